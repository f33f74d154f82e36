//! Top-level API router.

use axum::{middleware, Router};

use super::assistant::assistant_routes;
use super::entities::entity_routes;
use super::inference::inference_routes;
use super::middleware::{auth_middleware, AuthState};
use super::saved_query::saved_query_routes;
use super::state::AppState;

/// Combines every route group and resolves the caller from its Bearer token.
pub fn create_router(state: AppState) -> Router {
    let auth_state: AuthState = state.session_validator.clone();

    Router::new()
        .merge(assistant_routes())
        .merge(entity_routes())
        .merge(saved_query_routes())
        .merge(inference_routes())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state)
}
