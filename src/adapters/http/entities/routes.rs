//! Axum router configuration for the entity manager endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::super::state::AppState;
use super::handlers::{disable_entity_discovery, ping};

/// Create the entity manager router.
///
/// # Routes
///
/// - `GET /api/entities/ping` - liveness check
/// - `DELETE /internal/api/entities/managed/enablement?deleteData=bool`
pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .route("/api/entities/ping", get(ping))
        .route(
            "/internal/api/entities/managed/enablement",
            delete(disable_entity_discovery),
        )
}
