//! HTTP request handlers.

pub mod health;
pub mod invitations;

// Re-export common handler utilities
pub use health::health_check;
pub use invitations::{create_invitation, validate_invitation};
