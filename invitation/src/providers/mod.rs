//! Invitation providers.
//!
//! This module defines traits for every external dependency of the
//! invitation service. The service depends on these traits and the
//! application supplies concrete implementations.
//!
//! ```text
//! ┌──────────────────────┐
//! │  InvitationService   │
//! └──┬────────┬───────┬──┘
//!    │        │       │
//!    ▼        ▼       ▼
//! ┌──────┐ ┌──────┐ ┌─────────┐
//! │Token │ │Store │ │Publisher│
//! │ Gen  │ │      │ │         │
//! └──────┘ └──────┘ └─────────┘
//!  CSPRNG    Redis    RabbitMQ
//! ```
//!
//! This enables:
//! - **Testing**: Use mocks (in-memory, deterministic)
//! - **Production**: Use real services (Redis, RabbitMQ)

pub mod event_publisher;
pub mod invitation_store;
pub mod token_generator;

// Re-export provider traits
pub use event_publisher::EventPublisher;
pub use invitation_store::InvitationStore;
pub use token_generator::TokenGenerator;
