//! HTTP handlers for the saved query routes.

use axum::extract::{Path, State};
use axum::Json;

use crate::application::handlers::assistant::RequiredChecks;
use crate::application::handlers::UpdateSavedQueryCommand;
use crate::domain::foundation::SavedQueryId;
use crate::ports::RequestSchema;

use super::super::error::ApiError;
use super::super::extract::ValidatedJson;
use super::super::middleware::OptionalAuth;
use super::super::state::AppState;
use super::dto::{SavedQueryResponse, UpdateSavedQueryRequestBody, UpdateSavedQueryRequestParams};

/// PUT /api/osquery/saved_queries/:id
pub async fn update_saved_query(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(params): Path<UpdateSavedQueryRequestParams>,
    ValidatedJson(body): ValidatedJson<UpdateSavedQueryRequestBody>,
) -> Result<Json<SavedQueryResponse>, ApiError> {
    params.validate()?;
    state.check(
        RequiredChecks::new().authenticated_user(),
        user.as_ref(),
        &state.default_plugin_name,
    )?;

    let id = SavedQueryId::new(params.id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let cmd = UpdateSavedQueryCommand {
        id,
        patch: body.into_patch()?,
        updated_by: user.map(|u| u.username),
    };

    let saved_query = state.update_saved_query_handler().handle(cmd).await?;
    Ok(Json(SavedQueryResponse { data: saved_query }))
}
