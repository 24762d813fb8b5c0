//! HTTP service for Prism invitations.
//!
//! Thin axum shell over [`prism_invitation::InvitationService`]: it parses
//! requests, reads the caller identity forwarded by the gateway, and maps
//! invitation errors to status codes. All lifecycle rules live in the core
//! crate.
//!
//! # Request Flow
//!
//! 1. **Correlation ID** assigned (or taken from `X-Correlation-ID`)
//! 2. **Request context** attached with the configured timeout
//! 3. **Extract** body and `X-Tenant-ID` / `X-User-ID` headers
//! 4. **Call** the invitation service
//! 5. **Map** the result to an HTTP response
//!
//! # Example
//!
//! ```ignore
//! use prism_invitation_web::{build_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(service));
//! let app = build_router(state, config.request_timeout());
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod validation;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use extractors::{CorrelationId, Ctx, TenantId, UserId};
pub use middleware::{correlation_id_layer, request_context_layer, CORRELATION_ID_HEADER};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
