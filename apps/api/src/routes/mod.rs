pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::errors::AppError;
use crate::extract::handlers;
use crate::state::AppState;

/// Any verb other than POST on the extract endpoint.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/extract",
            post(handlers::handle_extract).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}
