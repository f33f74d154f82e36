//! HTTP error responses.
//!
//! Every error leaves the API as `{ "message": ... }` with the status picked
//! here. Handler and port errors convert into [`ApiError`] through `From` so
//! route handlers can use `?` throughout.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::assistant::CheckFailure;
use crate::application::handlers::{
    DisableEntityDiscoveryError, ExecuteAssistantError, UpdateSavedQueryError,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SchemaValidationError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An error ready to be turned into an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Request failed");
        }
        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}

impl From<SchemaValidationError> for ApiError {
    fn from(err: SchemaValidationError) -> Self {
        ApiError::BadRequest(err.to_client_message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<CheckFailure> for ApiError {
    fn from(failure: CheckFailure) -> Self {
        let message = failure.message().to_string();
        match failure {
            CheckFailure::LicenseInsufficient => ApiError::Forbidden(message),
            CheckFailure::Unauthenticated => ApiError::Unauthorized(message),
            CheckFailure::CapabilityMissing(_) => ApiError::NotFound(message),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ApiError::BadRequest(err.message),
            ErrorCode::ConversationNotFound
            | ErrorCode::SavedQueryNotFound
            | ErrorCode::ApiKeyNotFound => ApiError::NotFound(err.message),
            ErrorCode::Unauthorized => ApiError::Unauthorized(err.message),
            ErrorCode::Forbidden | ErrorCode::LicenseInsufficient => ApiError::Forbidden(err.message),
            ErrorCode::ConnectorError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ApiError::Internal(err.message)
            }
        }
    }
}

impl From<ExecuteAssistantError> for ApiError {
    fn from(err: ExecuteAssistantError) -> Self {
        match err {
            ExecuteAssistantError::Check(failure) => failure.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<UpdateSavedQueryError> for ApiError {
    fn from(err: UpdateSavedQueryError) -> Self {
        match err {
            UpdateSavedQueryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UpdateSavedQueryError::Prebuilt(_) | UpdateSavedQueryError::IdConflict(_) => {
                ApiError::Conflict(err.to_string())
            }
            UpdateSavedQueryError::Repository(e) => e.into(),
        }
    }
}

impl From<DisableEntityDiscoveryError> for ApiError {
    fn from(err: DisableEntityDiscoveryError) -> Self {
        match err {
            DisableEntityDiscoveryError::Infrastructure(e) => ApiError::Internal(e.message),
        }
    }
}
