use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{export, health, query};
use crate::state::AppState;

/// Query form, export endpoint, health probe.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(query::read_form).post(query::handle_form))
        .route("/download", post(export::download))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
