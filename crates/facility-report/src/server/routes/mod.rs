//! API routes for the upload server

pub mod upload;

use axum::{routing::post, Router};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload::upload_report))
}
