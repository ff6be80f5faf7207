//! Pluggable LLM backend abstraction shared by the LLM Worker.
//!
//! Exposes a closed [`chat::ChatBackend`] enum dispatching to three concrete
//! chat clients (OpenAI, Anthropic, Ollama), plus the config/error plumbing
//! those clients share.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;
