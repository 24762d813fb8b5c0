//! Mock invitation store for testing.

use crate::context::RequestContext;
use crate::error::{InvitationError, Result};
use crate::providers::InvitationStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// A `put` as the store received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInvitation {
    /// Storage key.
    pub key: String,
    /// Raw payload.
    pub payload: String,
    /// Requested time-to-live.
    pub ttl: Duration,
}

/// Payload and expiry. `None` never expires.
type Entry = (String, Option<Instant>);

fn expiry(ttl: Duration) -> Option<Instant> {
    Instant::now().checked_add(ttl)
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.is_none_or(|at| at > now)
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    puts: Vec<StoredInvitation>,
    fail_put: bool,
    fail_get: bool,
    fail_take: bool,
    fail_delete: bool,
}

/// Mock invitation store.
///
/// In-memory store with atomic take under a mutex, honoring TTLs against
/// `tokio` time (so paused-clock tests can advance past expiry). Every `put`
/// is recorded, and each operation can be switched to fail.
///
/// `get` yields to the scheduler after reading, so a caller that pairs `get`
/// with a later `delete` races against other tasks the way it would against
/// a remote store.
#[derive(Debug, Clone, Default)]
pub struct MockInvitationStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockInvitationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every `put` fail with a store error.
    pub fn fail_puts(&self, fail: bool) {
        self.lock().fail_put = fail;
    }

    /// Make every `get` fail with a store error.
    pub fn fail_gets(&self, fail: bool) {
        self.lock().fail_get = fail;
    }

    /// Make every `take` fail with a store error.
    pub fn fail_takes(&self, fail: bool) {
        self.lock().fail_take = fail;
    }

    /// Make every `delete` fail with a store error.
    pub fn fail_deletes(&self, fail: bool) {
        self.lock().fail_delete = fail;
    }

    /// All `put` calls received, in order.
    #[must_use]
    pub fn puts(&self) -> Vec<StoredInvitation> {
        self.lock().puts.clone()
    }

    /// Whether a live (unexpired) entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.lock()
            .entries
            .get(key)
            .is_some_and(|(_, expires_at)| is_live(*expires_at, now))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .entries
            .values()
            .filter(|(_, expires_at)| is_live(*expires_at, now))
            .count()
    }

    /// Whether the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Simulate TTL expiry of `key`.
    pub fn expire(&self, key: &str) {
        self.lock().entries.remove(key);
    }

    /// Insert a raw payload, bypassing `put` bookkeeping.
    pub fn insert_raw(&self, key: impl Into<String>, payload: impl Into<String>, ttl: Duration) {
        self.lock()
            .entries
            .insert(key.into(), (payload.into(), expiry(ttl)));
    }

    fn failure(operation: &str) -> InvitationError {
        InvitationError::Store(format!("mock {operation} failure"))
    }
}

impl InvitationStore for MockInvitationStore {
    async fn put(
        &self,
        ctx: &RequestContext,
        key: &str,
        payload: &str,
        ttl: Duration,
    ) -> Result<()> {
        ctx.run("store put", async {
            let mut inner = self.lock();
            if inner.fail_put {
                return Err(Self::failure("put"));
            }
            inner.puts.push(StoredInvitation {
                key: key.to_string(),
                payload: payload.to_string(),
                ttl,
            });
            inner
                .entries
                .insert(key.to_string(), (payload.to_string(), expiry(ttl)));
            Ok(())
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, key: &str) -> Result<Option<String>> {
        ctx.run("store get", async {
            let payload = {
                let inner = self.lock();
                if inner.fail_get {
                    return Err(Self::failure("get"));
                }
                let now = Instant::now();
                inner
                    .entries
                    .get(key)
                    .filter(|(_, expires_at)| is_live(*expires_at, now))
                    .map(|(payload, _)| payload.clone())
            };
            tokio::task::yield_now().await;
            Ok(payload)
        })
        .await
    }

    async fn take(&self, ctx: &RequestContext, key: &str) -> Result<Option<String>> {
        ctx.run("store take", async {
            // Atomic check-and-delete under mutex protection
            let mut inner = self.lock();
            if inner.fail_take {
                return Err(Self::failure("take"));
            }
            let now = Instant::now();
            Ok(inner
                .entries
                .remove(key)
                .filter(|(_, expires_at)| is_live(*expires_at, now))
                .map(|(payload, _)| payload))
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, key: &str) -> Result<()> {
        ctx.run("store delete", async {
            let mut inner = self.lock();
            if inner.fail_delete {
                return Err(Self::failure("delete"));
            }
            inner.entries.remove(key);
            Ok(())
        })
        .await
    }
}
