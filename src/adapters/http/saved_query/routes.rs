//! Axum router configuration for the osquery saved query endpoints.

use axum::{routing::put, Router};

use super::super::state::AppState;
use super::handlers::update_saved_query;

/// Create the saved query router.
///
/// # Routes
///
/// - `PUT /api/osquery/saved_queries/:id` - Update a saved query
pub fn saved_query_routes() -> Router<AppState> {
    Router::new().route("/api/osquery/saved_queries/:id", put(update_saved_query))
}
