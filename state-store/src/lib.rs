//! Redis-backed key-value store used as both database and cache (spec §2,
//! §3). All entities are stored as JSON strings at the bit-exact key layout
//! in [`review_core::keys`].
//!
//! A single [`StateStore`] wraps a multiplexed async connection, established
//! once per worker process and cheaply cloneable across tasks.

pub mod errors;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use review_core::keys;
use review_core::model::{Chunk, Conversation, ReviewRequest};

use crate::errors::{StateStoreError, StateStoreResult};

/// Default TTL for idempotency markers, per spec §3/§4.4: 24 hours.
pub const POSTED_MARKER_TTL_SECS: u64 = 24 * 60 * 60;

/// Thin wrapper around a multiplexed Redis connection.
///
/// Cheap to clone: `ConnectionManager` is itself `Clone` and multiplexes
/// commands over a single connection, reconnecting on failure
/// ("robust-connection semantics", spec §5).
#[derive(Clone)]
pub struct StateStore {
    conn: ConnectionManager,
}

impl StateStore {
    /// Connects to `redis_url`, establishing the connection once; the
    /// returned manager reconnects transparently on failure.
    pub async fn connect(redis_url: &str) -> StateStoreResult<Self> {
        debug!(redis_url, "connecting to state store");
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> StateStoreResult<Option<T>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(s) => {
                let value = serde_json::from_str(&s).map_err(|source| StateStoreError::Serde {
                    key: key.to_string(),
                    source,
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StateStoreResult<()> {
        let mut conn = self.conn.clone();
        let raw = serde_json::to_string(value).map_err(|source| StateStoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        conn.set(key, raw).await?;
        Ok(())
    }

    pub async fn get_review_request(
        &self,
        review_request_id: &str,
    ) -> StateStoreResult<Option<ReviewRequest>> {
        self.get_json(&keys::review_request(review_request_id)).await
    }

    pub async fn put_review_request(&self, request: &ReviewRequest) -> StateStoreResult<()> {
        self.put_json(&keys::review_request(&request.review_request_id), request)
            .await
    }

    pub async fn get_chunk(&self, chunk_id: &str) -> StateStoreResult<Option<Chunk>> {
        self.get_json(&keys::chunk(chunk_id)).await
    }

    pub async fn put_chunk(&self, chunk: &Chunk) -> StateStoreResult<()> {
        self.put_json(&keys::chunk(&chunk.chunk_id), chunk).await
    }

    /// Adds `chunk_id` to the administrative traversal set for its request.
    pub async fn add_chunk_to_request(
        &self,
        review_request_id: &str,
        chunk_id: &str,
    ) -> StateStoreResult<()> {
        let mut conn = self.conn.clone();
        conn.sadd(keys::review_request_chunks(review_request_id), chunk_id)
            .await?;
        Ok(())
    }

    pub async fn chunk_ids_for_request(
        &self,
        review_request_id: &str,
    ) -> StateStoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn
            .smembers(keys::review_request_chunks(review_request_id))
            .await?;
        Ok(ids)
    }

    pub async fn get_conversation(
        &self,
        review_request_id: &str,
        chunk_id: &str,
    ) -> StateStoreResult<Option<Conversation>> {
        self.get_json(&keys::conversation(review_request_id, chunk_id))
            .await
    }

    pub async fn put_conversation(
        &self,
        review_request_id: &str,
        chunk_id: &str,
        conversation: &Conversation,
    ) -> StateStoreResult<()> {
        self.put_json(&keys::conversation(review_request_id, chunk_id), conversation)
            .await
    }

    /// Deletes the conversation once a chunk reaches a terminal status
    /// (spec §3: "discarded after chunk terminates").
    pub async fn delete_conversation(
        &self,
        review_request_id: &str,
        chunk_id: &str,
    ) -> StateStoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(keys::conversation(review_request_id, chunk_id))
            .await?;
        Ok(())
    }

    /// Atomically claims the idempotency marker for `(repo_id, pr_id, hash)`.
    ///
    /// Returns `true` if this call newly claimed the marker (the caller
    /// should proceed to post the comment); `false` if it already existed
    /// (the caller must short-circuit to `POSTED` without a provider call).
    /// Uses `SET key value NX EX ttl`, which is atomic in Redis.
    pub async fn try_claim_posted_marker(
        &self,
        repo_id: &str,
        pr_id: u64,
        hash: &str,
        ttl_secs: u64,
    ) -> StateStoreResult<bool> {
        let mut conn = self.conn.clone();
        let key = keys::posted(repo_id, pr_id, hash);
        let claimed: bool = redis::cmd("SET")
            .arg(&key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<Option<String>>(&mut conn)
            .await?
            .is_some();
        Ok(claimed)
    }

    /// Releases a previously claimed posted marker.
    ///
    /// Used when a claimed marker turns out not to correspond to an actual
    /// successful post (spec §4.4 only writes the marker "on success"); a
    /// failed provider call must not permanently suppress a comment that was
    /// never posted.
    pub async fn release_posted_marker(
        &self,
        repo_id: &str,
        pr_id: u64,
        hash: &str,
    ) -> StateStoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(keys::posted(repo_id, pr_id, hash)).await?;
        Ok(())
    }

    /// Non-mutating check for the marker's existence, used by callers that
    /// only need to decide whether to short-circuit (spec §4.4).
    pub async fn posted_marker_exists(
        &self,
        repo_id: &str,
        pr_id: u64,
        hash: &str,
    ) -> StateStoreResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(keys::posted(repo_id, pr_id, hash)).await?;
        Ok(exists)
    }

    /// Compare-and-set on a chunk's `status` field, guarding against a race
    /// between two deliveries of the same message (spec §9: "a
    /// compare-and-set on `status` is a safe optional defence"). Returns
    /// `false` without writing if the stored chunk's status does not match
    /// `expected`.
    pub async fn cas_chunk_status(
        &self,
        chunk_id: &str,
        expected: review_core::model::ChunkStatus,
        updated: Chunk,
    ) -> StateStoreResult<bool> {
        let current = self.get_chunk(chunk_id).await?;
        match current {
            Some(c) if c.status == expected => {
                self.put_chunk(&updated).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
