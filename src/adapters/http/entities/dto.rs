//! Request and response shapes for the entity manager routes.

use serde::{Deserialize, Serialize};

use crate::ports::{RequestSchema, SchemaValidationError};

/// Query string of `DELETE /internal/api/entities/managed/enablement`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisableEnablementQuery {
    #[serde(default)]
    pub delete_data: bool,
}

impl RequestSchema for DisableEnablementQuery {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        Ok(())
    }
}

/// Body of the ping route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}
