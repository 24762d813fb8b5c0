//! Redis-based invitation store.
//!
//! # Architecture
//!
//! Invitations are stored in Redis with:
//! - **Key**: `invitation:{base64(sha256(token))}` → JSON-serialized record
//! - **TTL**: Invitation lifetime (7 days by default), enforced by Redis
//! - **Atomic redemption**: GETDEL returns and removes the record in one command
//!
//! # Security
//!
//! - **Single-use**: Concurrent redemptions of one key yield at most one record
//! - **No plaintext**: Only the hashed token ever reaches Redis
//! - **Key namespacing**: Callers pass keys already prefixed with `invitation:`
//!
//! # Example
//!
//! ```no_run
//! use prism_invitation::context::RequestContext;
//! use prism_invitation::providers::InvitationStore;
//! use prism_invitation::stores::RedisInvitationStore;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisInvitationStore::new("redis://127.0.0.1:6379").await?;
//! let ctx = RequestContext::with_timeout(Duration::from_secs(5));
//!
//! store
//!     .put(&ctx, "invitation:abc", r#"{"email":"a@x.com"}"#, Duration::from_secs(3600))
//!     .await?;
//!
//! // Later: redeem (atomic, single-use)
//! if let Some(payload) = store.take(&ctx, "invitation:abc").await? {
//!     println!("Redeemed: {payload}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::context::RequestContext;
use crate::error::{InvitationError, Result};
use crate::providers::InvitationStore;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::time::Duration;

/// `Redis`-backed invitation store.
///
/// # Thread Safety
///
/// This type is `Clone` and can be safely shared across tasks.
/// Each clone shares the same `ConnectionManager`, which multiplexes
/// concurrent commands over one connection and reconnects on failure.
#[derive(Clone)]
pub struct RedisInvitationStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
}

impl RedisInvitationStore {
    /// Connect to `Redis`.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - `Redis` connection URL (e.g., "<redis://127.0.0.1:6379>")
    ///
    /// # Connection URL Format
    ///
    /// - TCP: `redis://[:password@]host[:port][/database]`
    /// - TLS: `rediss://[:password@]host[:port][/database]`
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Connection`] if:
    /// - `Redis` URL is malformed
    /// - Connection to `Redis` server fails
    /// - Authentication fails
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            InvitationError::Connection(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            InvitationError::Connection(format!(
                "Failed to create Redis connection manager: {e}"
            ))
        })?;

        tracing::info!("RedisInvitationStore initialized successfully");

        Ok(Self { conn_manager })
    }

    /// Whole seconds for `SET EX`. Redis rejects a zero expiry.
    fn ttl_seconds(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }
}

impl std::fmt::Debug for RedisInvitationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisInvitationStore").finish_non_exhaustive()
    }
}

impl InvitationStore for RedisInvitationStore {
    async fn put(
        &self,
        ctx: &RequestContext,
        key: &str,
        payload: &str,
        ttl: Duration,
    ) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let ttl_seconds = Self::ttl_seconds(ttl);

        ctx.run("store put", async {
            // SET EX is atomic: SET + EXPIRE in one command
            let _: () = conn
                .set_ex(key, payload, ttl_seconds)
                .await
                .map_err(|e| InvitationError::Store(format!("Failed to store invitation: {e}")))?;
            Ok(())
        })
        .await?;

        tracing::debug!(ttl_seconds = ttl_seconds, "Stored invitation in Redis");

        Ok(())
    }

    async fn get(&self, ctx: &RequestContext, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();

        ctx.run("store get", async {
            conn.get(key)
                .await
                .map_err(|e| InvitationError::Store(format!("Failed to read invitation: {e}")))
        })
        .await
    }

    async fn take(&self, ctx: &RequestContext, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();

        // GETDEL is atomic (get + delete in one operation):
        // concurrent redemptions of the same key see the payload at most once.
        let payload: Option<String> = ctx
            .run("store take", async {
                conn.get_del(key).await.map_err(|e| {
                    InvitationError::Store(format!("Failed to redeem invitation: {e}"))
                })
            })
            .await?;

        if payload.is_none() {
            // Consumed, expired, or never issued. Not distinguished.
            tracing::trace!("Invitation key not found on redemption");
        }

        Ok(payload)
    }

    async fn delete(&self, ctx: &RequestContext, key: &str) -> Result<()> {
        let mut conn = self.conn_manager.clone();

        let deleted: i32 = ctx
            .run("store delete", async {
                conn.del(key).await.map_err(|e| {
                    InvitationError::Store(format!("Failed to delete invitation from Redis: {e}"))
                })
            })
            .await?;

        if deleted > 0 {
            tracing::debug!("Deleted invitation from Redis");
        } else {
            tracing::trace!("Invitation delete: key not found (already deleted or never existed)");
        }

        Ok(())
    }
}
