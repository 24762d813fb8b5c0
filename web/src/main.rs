//! Prism invitation service HTTP server.
//!
//! Issues single-use tenant invitations backed by Redis and dispatches
//! invitation emails through RabbitMQ.

use prism_invitation::stores::RedisInvitationStore;
use prism_invitation::{InvitationService, SecureTokenGenerator};
use prism_invitation_web::{build_router, AppState, Config};
use prism_rabbitmq::RabbitMqPublisher;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local development: pick up a .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "prism_invitation=info,prism_rabbitmq=info,prism_invitation_web=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        service = %config.server.service_name,
        port = config.server.port,
        redis_url = %config.redis.url,
        jaeger_endpoint = %config.telemetry.jaeger_endpoint,
        invitation_ttl_hours = config.invitation.ttl_hours,
        "Configuration loaded"
    );

    // Setup invitation store
    info!("Connecting to Redis...");
    let store = RedisInvitationStore::new(&config.redis.url).await?;
    info!("Redis connected");

    // Setup notification publisher
    info!("Connecting to RabbitMQ...");
    let publisher = RabbitMqPublisher::builder()
        .url(&config.rabbitmq.url)
        .timeout(config.publish_timeout())
        .connect()
        .await?;
    info!("RabbitMQ connected");

    let service = Arc::new(InvitationService::new(
        SecureTokenGenerator::new(),
        store,
        publisher,
        config.invitation_config(),
    ));

    let app = build_router(AppState::new(Arc::clone(&service)), config.request_timeout());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Starting HTTP server");

    // Fired once a termination signal arrives
    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            trigger.cancel();
        })
        .into_future();

    let shutdown_timeout = config.shutdown_timeout();
    tokio::select! {
        result = server => result?,
        () = async {
            shutdown.cancelled().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "In-flight requests did not finish before the shutdown timeout"
            );
        }
    }

    if let Err(e) = service.close().await {
        error!(error = %e, "Failed to close RabbitMQ publisher");
    }

    info!(service = %config.server.service_name, "Server shutdown complete");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
