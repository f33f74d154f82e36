//! Query shape for the inference endpoints table route.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::application::handlers::ListInferenceTableQuery;
use crate::domain::inference::{
    FilterOptions, QueryParams, ServiceProvider, SortField, SortOrder, TaskType,
    DEFAULT_TABLE_LIMIT, PER_PAGE_VALUES,
};
use crate::ports::{RequestSchema, SchemaValidationError};

/// Query string of `GET /internal/inference_endpoints/table`.
///
/// `provider` and `type` are comma-separated lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceTableQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub provider: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub search_key: String,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_TABLE_LIMIT
}

fn parse_list<T: DeserializeOwned>(
    field: &str,
    raw: Option<&str>,
) -> Result<Vec<T>, SchemaValidationError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| {
                SchemaValidationError::InvalidFormat {
                    field: field.to_string(),
                    format: format!("known {}", field),
                }
            })
        })
        .collect()
}

impl RequestSchema for InferenceTableQuery {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();

        if self.page < 1 {
            errors.push(SchemaValidationError::OutOfRange {
                field: "page".into(),
                value: self.page.to_string(),
                min: "1".into(),
                max: usize::MAX.to_string(),
            });
        }
        if !PER_PAGE_VALUES.contains(&self.per_page) {
            errors.push(SchemaValidationError::InvalidFormat {
                field: "perPage".into(),
                format: format!("one of {:?}", PER_PAGE_VALUES),
            });
        }
        if let Err(e) = parse_list::<ServiceProvider>("provider", self.provider.as_deref()) {
            errors.push(e);
        }
        if let Err(e) = parse_list::<TaskType>("type", self.task_type.as_deref()) {
            errors.push(e);
        }

        SchemaValidationError::from_errors(errors)
    }
}

impl InferenceTableQuery {
    pub fn into_query(self) -> Result<ListInferenceTableQuery, SchemaValidationError> {
        Ok(ListInferenceTableQuery {
            params: QueryParams {
                page: self.page,
                per_page: self.per_page,
                sort_field: self.sort_field,
                sort_order: self.sort_order,
            },
            filters: FilterOptions {
                provider: parse_list("provider", self.provider.as_deref())?,
                task_type: parse_list("type", self.task_type.as_deref())?,
            },
            search_key: self.search_key,
        })
    }
}
