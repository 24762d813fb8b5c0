//! Application state for Axum handlers.

use prism_invitation::providers::{EventPublisher, InvitationStore, TokenGenerator};
use prism_invitation::InvitationService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the service itself sits behind an `Arc`.
///
/// # Type Parameters
///
/// - `G`: Token generator
/// - `S`: Invitation store
/// - `P`: Event publisher
pub struct AppState<G, S, P>
where
    G: TokenGenerator,
    S: InvitationStore,
    P: EventPublisher,
{
    /// Invitation lifecycle service.
    pub service: Arc<InvitationService<G, S, P>>,
}

impl<G, S, P> AppState<G, S, P>
where
    G: TokenGenerator,
    S: InvitationStore,
    P: EventPublisher,
{
    /// Create a new application state.
    #[must_use]
    pub const fn new(service: Arc<InvitationService<G, S, P>>) -> Self {
        Self { service }
    }
}

// Manual impl: cloning only bumps the `Arc`, so providers need not be `Clone`.
impl<G, S, P> Clone for AppState<G, S, P>
where
    G: TokenGenerator,
    S: InvitationStore,
    P: EventPublisher,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_invitation::mocks::{MockEventPublisher, MockInvitationStore, MockTokenGenerator};
    use prism_invitation::InvitationConfig;

    #[test]
    fn test_clone_shares_service() {
        let state = AppState::new(Arc::new(InvitationService::new(
            MockTokenGenerator::default(),
            MockInvitationStore::new(),
            MockEventPublisher::new(),
            InvitationConfig::default(),
        )));

        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.service, &cloned.service));
    }
}
