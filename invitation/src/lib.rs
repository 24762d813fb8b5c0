//! # Prism Invitation
//!
//! Single-use, time-limited invitations for onboarding users into a tenant.
//!
//! ## Features
//!
//! - **Opaque tokens**: 256-bit random, URL safe
//! - **Hashed at rest**: Only `sha256(token)` is ever stored
//! - **Self-expiring**: The store enforces the invitation TTL
//! - **Single-use**: Redemption atomically removes the record
//! - **Email dispatch**: A notification event is published per invitation
//!
//! ## Architecture
//!
//! ```text
//! InvitationService
//!   ├── TokenGenerator   (SecureTokenGenerator)
//!   ├── InvitationStore  (RedisInvitationStore)
//!   └── EventPublisher   (RabbitMqPublisher, in prism-rabbitmq)
//! ```
//!
//! Every provider is a trait, so tests swap in the [`mocks`] implementations.
//!
//! ## Example
//!
//! ```rust
//! use prism_invitation::mocks::{MockEventPublisher, MockInvitationStore, MockTokenGenerator};
//! use prism_invitation::{InvitationConfig, InvitationService, RequestContext};
//!
//! # async fn example() -> prism_invitation::Result<()> {
//! let service = InvitationService::new(
//!     MockTokenGenerator::fixed("T1"),
//!     MockInvitationStore::new(),
//!     MockEventPublisher::new(),
//!     InvitationConfig::default(),
//! );
//! let ctx = RequestContext::background();
//!
//! let token = service
//!     .create_invitation(&ctx, "a@x.com", "admin", "tenant-1", "user-9")
//!     .await?;
//!
//! let record = service.validate_invitation(&ctx, &token).await?;
//! assert_eq!(record.tenant_id, "tenant-1");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod providers;
pub mod record;
pub mod service;
pub mod stores;
pub mod token;

// Mock providers for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::InvitationConfig;
pub use context::RequestContext;
pub use error::{CloseError, InvitationError, Result};
pub use events::NotificationEvent;
pub use record::InvitationRecord;
pub use service::InvitationService;
pub use token::{hash_token, SecureTokenGenerator, TokenHash};
