use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::server::handlers;
use crate::server::state::AppState;

/// Builds the API router; `static_dir` optionally serves a separately
/// built UI for every non-API path.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/datasets", get(handlers::datasets))
        .route("/api/datasets/:folder/files", get(handlers::dataset_files))
        .route("/api/load", post(handlers::load_file))
        .route("/api/scenario/:index", get(handlers::scenario))
        .route("/api/load-scenario", post(handlers::load_scenario))
        .route("/api/build-index", post(handlers::build_index))
        .route("/api/index-status", get(handlers::index_status))
        .route("/api/search", get(handlers::search_files))
        .route("/api/search-scenarios", get(handlers::search_scenarios));
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(handlers::landing)),
    };
    router.with_state(state)
}
