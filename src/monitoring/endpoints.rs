use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyHealth {
    pub status: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub version: String,
    pub store: DependencyHealth,
    pub cache: DependencyHealth,
}

/// Create monitoring router with health endpoints
pub fn monitoring_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/detailed", get(detailed_health_check))
}

/// Basic liveness check
async fn health_check() -> impl IntoResponse {
    let health = serde_json::json!({
        "status": "healthy",
        "service": "vibecheck"
    });

    (StatusCode::OK, Json(health))
}

/// Store and cache reachability. A cache outage only degrades the service,
/// a store outage makes it unhealthy.
async fn detailed_health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let started = Instant::now();
    let store = match state.items.store().health_check().await {
        Ok(()) => healthy(started),
        Err(e) => unhealthy(started, e.to_string()),
    };

    let started = Instant::now();
    let cache = match state.items.cache().ping().await {
        Ok(()) => healthy(started),
        Err(e) => unhealthy(started, e.to_string()),
    };

    let (overall, status_code) = match (store.error.is_none(), cache.error.is_none()) {
        (true, true) => ("healthy", StatusCode::OK),
        (true, false) => ("degraded", StatusCode::OK),
        (false, _) => ("unhealthy", StatusCode::SERVICE_UNAVAILABLE),
    };

    if status_code == StatusCode::OK {
        info!("Health check: {}", overall);
    } else {
        warn!("Health check: {}", overall);
    }

    let health = HealthCheck {
        status: overall.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        cache,
    };

    (status_code, Json(health))
}

fn healthy(started: Instant) -> DependencyHealth {
    DependencyHealth {
        status: "healthy".to_string(),
        response_time_ms: started.elapsed().as_millis() as u64,
        error: None,
    }
}

fn unhealthy(started: Instant, error: String) -> DependencyHealth {
    DependencyHealth {
        status: "unhealthy".to_string(),
        response_time_ms: started.elapsed().as_millis() as u64,
        error: Some(error),
    }
}
