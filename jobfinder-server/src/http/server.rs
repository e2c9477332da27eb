//! Axum server setup
//!
//! Server skeleton with:
//! - JSON API routes plus an optional static client fallback
//! - Per-request timeout
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use jobfinder_core::JobfinderConfig;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::Store;
use crate::ingest::Scraper;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Browser client served for every non-API path
    pub static_dir: Option<PathBuf>,

    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn from_config(config: &JobfinderConfig) -> Result<Self, ServerError> {
        let host = config.server.host.as_str();
        let port = config.server.port;
        let bind_addr = (host, port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ServerError::BindAddr {
                addr: format!("{host}:{port}"),
            })?;

        Ok(Self {
            bind_addr,
            static_dir: config.server.static_dir.clone(),
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        })
    }
}

/// Shared application state
pub struct AppState {
    pub store: Store,
    pub scraper: Arc<dyn Scraper>,
}

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::postings::router())
        .merge(routes::stats::router())
        .merge(routes::scrape::router());

    let app = match &config.static_dir {
        Some(dir) => {
            let shell = ServeFile::new(dir.join("index.html"));
            api.fallback_service(ServeDir::new(dir).fallback(shell))
        }
        None => api.fallback(|| async { ApiError::not_found("Route") }),
    };

    with_middleware(app, config.request_timeout).with_state(Arc::new(state))
}

/// Tracing, a 408 request timeout and permissive CORS.
fn with_middleware<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    )
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static client");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bind address '{addr}'")]
    BindAddr { addr: String },
}
