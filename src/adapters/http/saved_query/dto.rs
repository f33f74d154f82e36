//! Request and response shapes for the saved query routes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SavedQueryId;
use crate::domain::saved_query::{EcsMapping, SavedQuery, SavedQueryPatch};
use crate::ports::{RequestSchema, SchemaValidationError};

/// Path parameters of `PUT /api/osquery/saved_queries/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSavedQueryRequestParams {
    pub id: String,
}

impl RequestSchema for UpdateSavedQueryRequestParams {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        SavedQueryId::new(self.id.as_str())
            .map(|_| ())
            .map_err(SchemaValidationError::from)
    }
}

/// Body of `PUT /api/osquery/saved_queries/:id`. Every field is optional;
/// absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSavedQueryRequestBody {
    pub id: Option<String>,
    pub description: Option<String>,
    pub query: Option<String>,
    pub ecs_mapping: Option<EcsMapping>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub interval: Option<i64>,
    pub snapshot: Option<bool>,
    pub removed: Option<bool>,
}

impl RequestSchema for UpdateSavedQueryRequestBody {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();

        if let Some(id) = &self.id {
            if let Err(e) = SavedQueryId::new(id) {
                errors.push(e.into());
            }
        }
        if self.query.as_deref().is_some_and(|q| q.trim().is_empty()) {
            errors.push(SchemaValidationError::InvalidFormat {
                field: "query".into(),
                format: "non-empty string".into(),
            });
        }
        if let Some(interval) = self.interval {
            if interval < 1 || interval > i64::from(u32::MAX) {
                errors.push(SchemaValidationError::OutOfRange {
                    field: "interval".into(),
                    value: interval.to_string(),
                    min: "1".into(),
                    max: u32::MAX.to_string(),
                });
            }
        }
        if let Some(mapping) = &self.ecs_mapping {
            for (ecs_field, entry) in mapping {
                if entry.field.is_none() && entry.value.is_none() {
                    errors.push(SchemaValidationError::MissingRequired {
                        field: format!("ecs_mapping.{}.field", ecs_field),
                    });
                }
            }
        }

        SchemaValidationError::from_errors(errors)
    }
}

impl UpdateSavedQueryRequestBody {
    /// Converts a validated body into a patch.
    pub fn into_patch(self) -> Result<SavedQueryPatch, SchemaValidationError> {
        let id = self.id.map(SavedQueryId::new).transpose()?;
        let interval = self
            .interval
            .map(u32::try_from)
            .transpose()
            .map_err(|_| SchemaValidationError::InvalidType {
                field: "interval".into(),
                expected: "positive integer".into(),
                actual: "out of range".into(),
            })?;

        Ok(SavedQueryPatch {
            id,
            description: self.description,
            query: self.query,
            ecs_mapping: self.ecs_mapping,
            version: self.version,
            platform: self.platform,
            interval,
            snapshot: self.snapshot,
            removed: self.removed,
        })
    }
}

/// Body of a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQueryResponse {
    pub data: SavedQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Result<UpdateSavedQueryRequestBody, serde_json::Error> {
        serde_json::from_value(json)
    }

    #[test]
    fn empty_body_is_valid() {
        let body = parse(serde_json::json!({})).unwrap();
        assert!(body.validate().is_ok());
        assert_eq!(body.into_patch().unwrap(), SavedQueryPatch::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let body = parse(serde_json::json!({ "interval": 0 })).unwrap();
        let err = body.validate().unwrap_err();
        assert!(err.to_client_message().contains("interval"));
    }

    #[test]
    fn empty_query_is_rejected() {
        let body = parse(serde_json::json!({ "query": "  " })).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn string_interval_fails_to_deserialize() {
        assert!(parse(serde_json::json!({ "interval": "3600" })).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = parse(serde_json::json!({ "prebuilt": false, "query": "select 1;" })).unwrap();
        assert_eq!(body.query.as_deref(), Some("select 1;"));
    }

    #[test]
    fn ecs_mapping_entry_needs_field_or_value() {
        let body = parse(serde_json::json!({
            "ecs_mapping": {
                "host.name": { "field": "hostname" },
                "labels.env": {}
            }
        }))
        .unwrap();

        let err = body.validate().unwrap_err();
        assert_eq!(err.to_client_message(), "Missing required field: ecs_mapping.labels.env.field");
    }

    #[test]
    fn valid_body_becomes_patch() {
        let body = parse(serde_json::json!({
            "id": "uptime_v2",
            "query": "select * from uptime;",
            "interval": 60,
            "ecs_mapping": { "tags": { "value": ["a", "b"] } }
        }))
        .unwrap();
        assert!(body.validate().is_ok());

        let patch = body.into_patch().unwrap();
        assert_eq!(patch.id, Some(SavedQueryId::new("uptime_v2").unwrap()));
        assert_eq!(patch.interval, Some(60));
        assert!(patch.ecs_mapping.is_some());
    }

    #[test]
    fn path_id_must_be_non_empty() {
        assert!(UpdateSavedQueryRequestParams { id: String::new() }.validate().is_err());
        assert!(UpdateSavedQueryRequestParams { id: "q".into() }.validate().is_ok());
    }
}
