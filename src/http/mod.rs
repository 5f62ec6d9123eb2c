//! HTTP front end: Axum server for spins and health checks.
//!
//! `POST /spin` takes the table's JSON bet format (simple or compound).
//! `GET /health` reports the static service descriptor.

pub mod routes;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::{self, AppState, Shutdown};

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/spin", post(routes::spin))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the HTTP front end on the configured port until shutdown.
pub async fn serve_http(state: AppState, shutdown: Shutdown) -> Result<()> {
    let port = state.config.service.http_port;
    server::serve("http", port, build_router(state), shutdown).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
