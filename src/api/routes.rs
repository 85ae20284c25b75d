//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{get_image, health, process_path, AppState};

/// Create the API router.
///
/// All origins are permitted on all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Image serving
        .route("/get_image/*filename", get(get_image))
        // Path processing
        .route("/process_path", post(process_path))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
