//! Axum router configuration for the assistant endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{execute_connector, get_capabilities, get_evaluate, read_conversation};

/// Create the assistant router.
///
/// # Routes
///
/// - `POST /internal/elastic_assistant/actions/connector/:connector_id/_execute`
/// - `GET /internal/elastic_assistant/capabilities`
/// - `GET /internal/elastic_assistant/evaluate`
/// - `GET /api/security_ai_assistant/current_user/conversations/:id`
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/internal/elastic_assistant/actions/connector/:connector_id/_execute",
            post(execute_connector),
        )
        .route("/internal/elastic_assistant/capabilities", get(get_capabilities))
        .route("/internal/elastic_assistant/evaluate", get(get_evaluate))
        .route(
            "/api/security_ai_assistant/current_user/conversations/:id",
            get(read_conversation),
        )
}
