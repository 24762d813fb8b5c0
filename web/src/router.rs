//! Router configuration for the invitation service.

use crate::handlers::{create_invitation, health_check, validate_invitation};
use crate::middleware::{correlation_id_layer, request_context_layer};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use prism_invitation::providers::{EventPublisher, InvitationStore, TokenGenerator};
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /invitations/health`
/// - `POST /invitations`
/// - `POST /invitations/validate`
///
/// Every request gets a correlation ID and a [`RequestContext`] expiring
/// after `request_timeout`.
///
/// [`RequestContext`]: prism_invitation::RequestContext
pub fn build_router<G, S, P>(state: AppState<G, S, P>, request_timeout: Duration) -> Router
where
    G: TokenGenerator + 'static,
    S: InvitationStore + 'static,
    P: EventPublisher + 'static,
{
    Router::new()
        // Health check (no authentication)
        .route("/invitations/health", get(health_check))
        // Issued by authenticated tenant users via the gateway
        .route("/invitations", post(create_invitation::<G, S, P>))
        // Internal: called by the auth service during sign-up
        .route("/invitations/validate", post(validate_invitation::<G, S, P>))
        .with_state(state)
        .layer(request_context_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
