//! Invitation store trait.
//!
//! Key-value storage with native per-key expiry. Keys are
//! [`TokenHash::storage_key`](crate::token::TokenHash::storage_key) values,
//! payloads are JSON-encoded [`InvitationRecord`](crate::record::InvitationRecord)s.

use crate::context::RequestContext;
use crate::error::Result;
use std::time::Duration;

/// Invitation store.
///
/// # Implementation Notes
///
/// - Handles must be safe for concurrent use by in-flight requests
/// - Every call honors the [`RequestContext`] deadline and cancellation
/// - **CRITICAL**: `take()` MUST be atomic (use `Redis` GETDEL or a mutex)
///
/// # Security Requirements
///
/// 1. **Atomicity**: `take()` must atomically read and delete
/// 2. **Single-use**: Once taken, a key cannot be taken again
/// 3. **Expiration**: Expired keys must read as absent
pub trait InvitationStore: Send + Sync {
    /// Write a payload and set its expiry.
    ///
    /// Overwriting an existing key is accepted.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store is unreachable
    /// - The request context is cancelled or past its deadline
    fn put(
        &self,
        ctx: &RequestContext,
        key: &str,
        payload: &str,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read a payload without consuming it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))`: Key exists and has not expired
    /// - `Ok(None)`: Key absent or expired
    /// - `Err(...)`: Transport failure
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the context ends first.
    fn get(
        &self,
        ctx: &RequestContext,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Atomically read and delete a payload.
    ///
    /// Concurrent calls for the same key observe the payload at most once.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))`: Key existed and has now been removed
    /// - `Ok(None)`: Key absent, expired, or already taken
    /// - `Err(...)`: Transport failure
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the context ends first.
    fn take(
        &self,
        ctx: &RequestContext,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Delete a key.
    ///
    /// Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the context ends first.
    fn delete(
        &self,
        ctx: &RequestContext,
        key: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
