//! Liveness and store readiness
//!
//! `GET /health` answers 200 while the store responds and 503 otherwise,
//! so a load balancer can drain an instance whose database went away.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthReport {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

impl HealthReport {
    fn new(store_up: bool) -> Self {
        Self {
            status: if store_up { "ok" } else { "degraded" },
            store: if store_up { "up" } else { "down" },
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    match state.controller.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthReport::new(true))),
        Err(e) => {
            tracing::warn!(error = %e, "store did not answer health check");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthReport::new(false)))
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
