//! Mock provider implementations for testing.
//!
//! This module provides simple, in-memory implementations of all provider traits
//! for use in unit and integration tests.

pub mod event_publisher;
pub mod invitation_store;
pub mod token_generator;

pub use event_publisher::MockEventPublisher;
pub use invitation_store::{MockInvitationStore, StoredInvitation};
pub use token_generator::MockTokenGenerator;
