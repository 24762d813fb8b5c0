//! Storage implementations for invitations.
//!
//! - **Invitation Store** (Redis) - Hashed-token keyed records with TTL and atomic redemption

pub mod invitation_redis;

// Re-exports
pub use invitation_redis::RedisInvitationStore;
