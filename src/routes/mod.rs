//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor pages are served by the host web framework; this router only
//! carries the JSON API they call plus a health check. CORS is open because
//! those pages live on a different origin.

pub mod maps;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes with CORS, request tracing, and the upload body limit.
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/maps", post(maps::create_map))
        .route("/api/maps/{id}", get(maps::get_map))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
