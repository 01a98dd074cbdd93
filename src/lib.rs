use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cache;
pub mod cache_key;
pub mod cache_ttl;
pub mod domains;
pub mod monitoring;
pub mod optimization;
pub mod security;
pub mod state;
pub mod store;

use api::create_api_router;
use monitoring::monitoring_router;
use security::get_cors_layer;
use state::AppState;

pub fn create_app_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints (no state beyond the repository handles)
        .merge(monitoring_router())
        // Item and gameplay endpoints
        .merge(create_api_router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(get_cors_layer())
}
