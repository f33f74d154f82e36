//! Axum router configuration for the inference endpoints table.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::get_inference_table;

/// Create the inference router.
///
/// # Routes
///
/// - `GET /internal/inference_endpoints/table` - One page of the endpoints table
pub fn inference_routes() -> Router<AppState> {
    Router::new().route("/internal/inference_endpoints/table", get(get_inference_table))
}
