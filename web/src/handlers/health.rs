//! Health check endpoint.
//!
//! Used by load balancers and service discovery to verify the process is up.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Liveness response body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: &'static str,
}

/// Simple health check endpoint (for basic liveness).
///
/// Does NOT check Redis or RabbitMQ.
///
/// # Endpoint
///
/// ```text
/// GET /invitations/health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy"
/// }
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, HealthResponse { status: "healthy" });
    }
}
