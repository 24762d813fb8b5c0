//! Invitation endpoints.
//!
//! # Endpoints
//!
//! ```text
//! POST /invitations            issue an invitation (gateway-authenticated)
//! POST /invitations/validate   redeem a token (internal, called by auth service)
//! ```

use crate::error::AppError;
use crate::extractors::{CorrelationId, Ctx, TenantId, UserId};
use crate::state::AppState;
use crate::validation::is_valid_email;
use crate::WebResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use prism_invitation::providers::{EventPublisher, InvitationStore, TokenGenerator};
use prism_invitation::InvitationRecord;
use serde::{Deserialize, Serialize};

/// Body of `POST /invitations`.
#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    /// Invitee email address.
    #[serde(default)]
    pub email: String,
    /// Role granted on acceptance.
    #[serde(default)]
    pub role: String,
}

/// Body of `POST /invitations/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateInvitationRequest {
    /// Token from the acceptance link.
    #[serde(default)]
    pub token: String,
}

/// Acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable status.
    pub message: &'static str,
}

/// Issue an invitation.
///
/// # Responses
///
/// - `201 {"message": "invitation sent"}`
/// - `400` malformed body, missing role, or invalid email
/// - `401` missing `X-Tenant-ID` or `X-User-ID`
/// - `500` the invitation could not be stored
///
/// The token is never returned; it only reaches the invitee by email.
///
/// # Errors
///
/// Returns [`AppError`] as listed above.
pub async fn create_invitation<G, S, P>(
    State(state): State<AppState<G, S, P>>,
    CorrelationId(correlation_id): CorrelationId,
    Ctx(ctx): Ctx,
    tenant: Option<TenantId>,
    user: Option<UserId>,
    payload: Result<Json<CreateInvitationRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<MessageResponse>)>
where
    G: TokenGenerator + 'static,
    S: InvitationStore + 'static,
    P: EventPublisher + 'static,
{
    let Json(request) = payload
        .map_err(|e| AppError::bad_request(format!("invalid request body: {}", e.body_text())))?;

    let email = request.email.trim();
    let role = request.role.trim();

    if email.is_empty() || role.is_empty() {
        return Err(AppError::bad_request("email and role are required"));
    }
    if !is_valid_email(email) {
        return Err(AppError::bad_request("email is not a valid address"));
    }

    let TenantId(tenant_id) =
        tenant.ok_or_else(|| AppError::unauthorized("tenant_id not found in request"))?;
    let UserId(inviter_id) =
        user.ok_or_else(|| AppError::unauthorized("user_id not found in request"))?;

    tracing::debug!(
        correlation_id = %correlation_id,
        tenant_id = %tenant_id,
        inviter_id = %inviter_id,
        role = %role,
        "Creating invitation"
    );

    state
        .service
        .create_invitation(&ctx, email, role, &tenant_id, &inviter_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "invitation sent",
        }),
    ))
}

/// Redeem an invitation token.
///
/// # Responses
///
/// - `200` the invitation record (`{"email", "role", "tenantID"}`)
/// - `400` malformed body or empty token
/// - `404` token unknown, expired, or already used
/// - `500` the store failed
///
/// # Errors
///
/// Returns [`AppError`] as listed above.
pub async fn validate_invitation<G, S, P>(
    State(state): State<AppState<G, S, P>>,
    CorrelationId(correlation_id): CorrelationId,
    Ctx(ctx): Ctx,
    payload: Result<Json<ValidateInvitationRequest>, JsonRejection>,
) -> WebResult<Json<InvitationRecord>>
where
    G: TokenGenerator + 'static,
    S: InvitationStore + 'static,
    P: EventPublisher + 'static,
{
    let Json(request) = payload.map_err(|_| AppError::bad_request("token is required"))?;

    if request.token.is_empty() {
        return Err(AppError::bad_request("token is required"));
    }

    tracing::debug!(correlation_id = %correlation_id, "Validating invitation");

    let record = state
        .service
        .validate_invitation(&ctx, &request.token)
        .await?;

    Ok(Json(record))
}
