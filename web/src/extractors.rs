//! Custom Axum extractors.
//!
//! - `CorrelationId`: Correlation ID set by the middleware (or header, or new)
//! - `Ctx`: Request context set by the middleware
//! - `TenantId` / `UserId`: Caller identity forwarded by the API gateway
//!
//! The gateway authenticates the caller and forwards the tenant and user as
//! `X-Tenant-ID` and `X-User-ID`. A request missing either is rejected with 401.
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     Ctx(ctx): Ctx,
//!     TenantId(tenant_id): TenantId,
//!     UserId(user_id): UserId,
//! ) -> Result<Json<Response>, AppError> {
//!     tracing::info!(tenant_id = %tenant_id, user_id = %user_id, "Processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use prism_invitation::RequestContext;
use uuid::Uuid;

/// Header carrying the caller's tenant.
pub const TENANT_ID_HEADER: &str = "X-Tenant-ID";

/// Header carrying the caller's user ID.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Correlation ID for request tracing.
///
/// Prefers the value stored by the correlation middleware so handlers log the
/// same ID the client gets back.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Request context for store and broker calls.
///
/// Without the context middleware this yields a context with no deadline.
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<RequestContext>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Read a non-empty header value.
fn required_header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Tenant of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        required_header(parts, TENANT_ID_HEADER)
            .map(Self)
            .ok_or_else(|| AppError::unauthorized("tenant_id not found in request"))
    }
}

/// Authenticated caller (the inviter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        required_header(parts, USER_ID_HEADER)
            .map(Self)
            .ok_or_else(|| AppError::unauthorized("user_id not found in request"))
    }
}
