//! Domain model, diff chunking/filters, idempotency hashing and queue
//! message schemas shared by the orchestrator, LLM worker and git worker.
//!
//! Every record in [`model`] is stored verbatim as JSON at its key in the
//! shared state store; see [`keys`] for the exact key layout.

pub mod chunking;
pub mod filters;
pub mod idempotency;
pub mod keys;
pub mod messages;
pub mod model;
