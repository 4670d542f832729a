//! Axum server for the car API
//!
//! Browsers are admitted from the server's own origin (localhost and
//! 127.0.0.1 on the bound port) plus any `allowed_origins`; everything
//! else is refused unless CORS is switched to permissive.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::controller::CarController;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow any origin. Overrides `allowed_origins`.
    pub cors_permissive: bool,

    /// Extra browser origins, e.g. `https://admin.example.com`
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Origins admitted when CORS is not permissive.
    pub fn origins(&self) -> Vec<String> {
        let port = self.bind_addr.port();
        let mut origins = vec![
            format!("http://localhost:{}", port),
            format!("http://127.0.0.1:{}", port),
        ];
        for origin in &self.allowed_origins {
            let origin = origin.trim().trim_end_matches('/');
            if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_owned());
            }
        }
        origins
    }

    fn cors_layer(&self) -> Result<CorsLayer, ServerError> {
        if self.cors_permissive {
            tracing::warn!("CORS: permissive mode, all origins allowed");
            return Ok(CorsLayer::permissive());
        }

        let origins = self
            .origins()
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|_| ServerError::InvalidOrigin(origin))
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = origins.len(), "CORS origins configured");

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: CarController,
}

/// Build the router with every route and middleware layer.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::cars::router())
        .layer(config.cors_layer()?)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let controller = CarController::new(Arc::new(PgExecutor::new(pool)));
/// run_server(controller, ServerConfig::default()).await?;
/// ```
pub async fn run_server(controller: CarController, config: ServerConfig) -> Result<(), ServerError> {
    serve_until(controller, config, shutdown_signal()).await
}

/// Run the HTTP server until `shutdown` resolves, then drain in-flight requests.
pub async fn serve_until<F>(
    controller: CarController,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState { controller }, &config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "carro server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("carro server stopped");
    Ok(())
}

/// Resolve on the first of Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires; the other
/// one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0:?}")]
    InvalidOrigin(String),
}
