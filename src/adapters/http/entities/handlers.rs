//! HTTP handlers for the entity manager routes.

use axum::extract::State;
use axum::Json;

use crate::application::handlers::DisableEntityDiscoveryCommand;
use crate::domain::entities::{EnablementOutcome, PING_MESSAGE};

use super::super::error::ApiError;
use super::super::extract::ValidatedQuery;
use super::super::state::AppState;
use super::dto::{DisableEnablementQuery, PingResponse};

/// GET /api/entities/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: PING_MESSAGE.to_string(),
    })
}

/// DELETE /internal/api/entities/managed/enablement
///
/// A missing or invalid API key is a 200 with `success: false`; only
/// failures while uninstalling or revoking are errors.
pub async fn disable_entity_discovery(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DisableEnablementQuery>,
) -> Result<Json<EnablementOutcome>, ApiError> {
    let outcome = state
        .disable_entity_discovery_handler()
        .handle(DisableEntityDiscoveryCommand {
            delete_data: query.delete_data,
        })
        .await?;
    Ok(Json(outcome))
}
