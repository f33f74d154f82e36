//! HTTP handlers for the inference endpoints table.

use axum::extract::State;
use axum::Json;

use crate::domain::inference::TableProjection;

use super::super::error::ApiError;
use super::super::extract::ValidatedQuery;
use super::super::state::AppState;
use super::dto::InferenceTableQuery;

/// GET /internal/inference_endpoints/table
pub async fn get_inference_table(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<InferenceTableQuery>,
) -> Result<Json<TableProjection>, ApiError> {
    let table = state
        .list_inference_table_handler()
        .handle(query.into_query()?)
        .await?;
    Ok(Json(table))
}
