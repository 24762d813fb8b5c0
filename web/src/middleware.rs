//! Axum middleware for request tracking and request lifetime.
//!
//! - **Correlation ID tracking**: Extract or generate correlation IDs, echo them back
//! - **Request context**: Attach a [`RequestContext`] with the request timeout,
//!   cancelled if the client goes away before the handler finishes
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use prism_invitation_web::middleware::{correlation_id_layer, request_context_layer};
//! use std::time::Duration;
//!
//! let app = Router::new()
//!     .route("/invitations", post(create_invitation))
//!     .layer(request_context_layer(Duration::from_secs(30)))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use prism_invitation::RequestContext;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Boxed response future shared by the middleware services.
type BoxFuture<R, E> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<R, E>> + Send>>;

/// Create a layer that adds correlation ID tracking to all requests.
///
/// This layer:
/// - Extracts correlation ID from request header or generates new UUID
/// - Stores correlation ID in request extensions
/// - Creates tracing span with `correlation_id` field
/// - Injects correlation ID into response header
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        // Extract correlation ID from header or generate new
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        // Store in request extensions for handler access
        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

/// Create a layer that attaches a [`RequestContext`] to every request.
///
/// The context expires `timeout` after the request arrives. If the response
/// future is dropped early (client disconnect, server shutdown), the context
/// is cancelled and in-flight store or broker calls stop.
#[must_use]
pub const fn request_context_layer(timeout: Duration) -> RequestContextLayer {
    RequestContextLayer { timeout }
}

/// Layer for request context injection.
#[derive(Clone, Copy, Debug)]
pub struct RequestContextLayer {
    timeout: Duration,
}

impl<S> Layer<S> for RequestContextLayer {
    type Service = RequestContextMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestContextMiddleware {
            inner,
            timeout: self.timeout,
        }
    }
}

/// Middleware service for request context injection.
#[derive(Clone, Debug)]
pub struct RequestContextMiddleware<S> {
    inner: S,
    timeout: Duration,
}

impl<S> Service<Request> for RequestContextMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let ctx = RequestContext::with_timeout(self.timeout);
        req.extensions_mut().insert(ctx.clone());

        let fut = self.inner.call(req);

        Box::pin(async move {
            // Fires only if this future is dropped before completion.
            let guard = ctx.cancellation_token().clone().drop_guard();
            let response = fut.await;
            guard.disarm();
            response
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_correlation_id_generated_if_missing() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(correlation_id_layer());

        let request = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        let correlation_id = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("Correlation ID header should be present");

        assert!(Uuid::parse_str(correlation_id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_correlation_id_preserved_from_request() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(correlation_id_layer());

        let request_uuid = Uuid::new_v4();
        let request = Request::builder()
            .uri("/test")
            .header(CORRELATION_ID_HEADER, request_uuid.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        let response_id = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("Correlation ID header should be present")
            .to_str()
            .unwrap();

        assert_eq!(response_id, request_uuid.to_string());
    }

    #[tokio::test]
    async fn test_invalid_uuid_generates_new() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(correlation_id_layer());

        let request = Request::builder()
            .uri("/test")
            .header(CORRELATION_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        let uuid_str = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("Correlation ID header should be present")
            .to_str()
            .unwrap();
        assert!(Uuid::parse_str(uuid_str).is_ok());
        assert_ne!(uuid_str, "not-a-uuid");
    }

    #[tokio::test]
    async fn test_request_context_attached_with_deadline() {
        async fn handler(req: Request<Body>) -> String {
            let ctx = req
                .extensions()
                .get::<RequestContext>()
                .cloned()
                .expect("Context should be attached");
            let remaining = ctx.remaining().expect("Context should have a deadline");
            assert!(remaining <= Duration::from_secs(30));
            assert!(!ctx.is_cancelled());
            "ok".to_string()
        }

        let app = Router::new()
            .route("/test", get(handler))
            .layer(request_context_layer(Duration::from_secs(30)));

        let request = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_serves_without_deadline() {
        async fn handler(req: Request<Body>) -> String {
            let ctx = req
                .extensions()
                .get::<RequestContext>()
                .cloned()
                .expect("Context should be attached");
            assert!(ctx.deadline().is_none());
            "ok".to_string()
        }

        let app = Router::new()
            .route("/test", get(handler))
            .layer(request_context_layer(Duration::from_secs(u64::MAX)));

        let request = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_dropped_request_cancels_context() {
        let (tx, rx) = tokio::sync::oneshot::channel::<RequestContext>();
        let tx = std::sync::Arc::new(std::sync::Mutex::new(Some(tx)));

        let app = Router::new()
            .route(
                "/slow",
                get(move |req: Request<Body>| {
                    let tx = tx.clone();
                    async move {
                        if let Some(tx) = tx.lock().unwrap().take() {
                            let ctx = req.extensions().get::<RequestContext>().cloned();
                            tx.send(ctx.unwrap()).unwrap();
                        }
                        std::future::pending::<()>().await;
                        "unreachable"
                    }
                }),
            )
            .layer(request_context_layer(Duration::from_secs(30)));

        let request = Request::builder()
            .uri("/slow")
            .body(Body::empty())
            .unwrap();

        let in_flight = tokio::spawn(app.oneshot(request));
        let ctx = rx.await.unwrap();
        assert!(!ctx.is_cancelled());

        in_flight.abort();
        let _ = in_flight.await;

        assert!(ctx.is_cancelled());
    }
}
