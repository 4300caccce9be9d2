//! API Routes
//!
//! Item endpoints mounted under `/items`. Reads come straight from the
//! committed store; writes are validated and queued, and the response only
//! acknowledges that the intent was accepted.

mod error;
mod items;

#[cfg(test)]
mod router_tests;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Reads
        .route("/", get(items::list_items))
        .route("/stats", get(items::get_stats))
        // Mutations
        .route("/add", post(items::add_item))
        .route("/select", post(items::select_item))
        .route("/deselect", post(items::deselect_item))
        .route("/reorder", post(items::reorder_selected))
        .route("/reorder-all", post(items::reorder_available))
        // Read-after-write helper
        .route("/flush", post(items::flush_queues))
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
