//! Table projection for the inference endpoints list.
//!
//! Pure derivation from (records, query params, filters, search key,
//! deployment statuses) to the rows a list view renders. Nothing is cached
//! between calls; the same inputs always give the same projection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::endpoint::{DeploymentStatus, InferenceEndpoint, ServiceProvider, TaskType};

/// Page sizes offered by the table.
pub const PER_PAGE_VALUES: [usize; 4] = [10, 25, 50, 100];

/// Page size used when none is set.
pub const DEFAULT_TABLE_LIMIT: usize = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Column the table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Endpoint,
}

/// Paging and sorting requested by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_TABLE_LIMIT,
            sort_field: SortField::Endpoint,
            sort_order: SortOrder::Asc,
        }
    }
}

/// Provider and task type filters. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub provider: Vec<ServiceProvider>,
    #[serde(default, rename = "type")]
    pub task_type: Vec<TaskType>,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceEndpointRow {
    pub deployment: DeploymentStatus,
    pub endpoint: InferenceEndpoint,
    pub provider: ServiceProvider,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// Pagination state handed back to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub total_item_count: usize,
}

/// Sort state handed back to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    pub field: SortField,
    pub direction: SortOrder,
}

/// Everything the list view needs to render a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProjection {
    pub table_data: Vec<InferenceEndpointRow>,
    pub sorted_table_data: Vec<InferenceEndpointRow>,
    pub paginated_sorted_table_data: Vec<InferenceEndpointRow>,
    pub pagination: Pagination,
    pub sorting: Sorting,
}

/// Deployment status shown for an endpoint.
pub fn deployment_status_for(
    endpoint: &InferenceEndpoint,
    statuses: &HashMap<String, DeploymentStatus>,
) -> DeploymentStatus {
    if !endpoint.service.is_elastic_service() {
        return DeploymentStatus::NotApplicable;
    }
    endpoint
        .service_settings
        .model_id
        .as_ref()
        .and_then(|model_id| statuses.get(model_id).copied())
        .unwrap_or(DeploymentStatus::NotDeployable)
}

/// Applies provider, type and free-text filters and builds rows.
pub fn filter_rows(
    endpoints: &[InferenceEndpoint],
    filter_options: &FilterOptions,
    search_key: &str,
    statuses: &HashMap<String, DeploymentStatus>,
) -> Vec<InferenceEndpointRow> {
    endpoints
        .iter()
        .filter(|e| filter_options.provider.is_empty() || filter_options.provider.contains(&e.service))
        .filter(|e| {
            filter_options.task_type.is_empty() || filter_options.task_type.contains(&e.task_type)
        })
        .filter(|e| e.model_id.contains(search_key))
        .map(|e| InferenceEndpointRow {
            deployment: deployment_status_for(e, statuses),
            endpoint: e.clone(),
            provider: e.service,
            task_type: e.task_type,
        })
        .collect()
}

/// Stable sort of rows by endpoint model id.
pub fn sort_rows(rows: &[InferenceEndpointRow], params: &QueryParams) -> Vec<InferenceEndpointRow> {
    let mut sorted = rows.to_vec();
    match (params.sort_field, params.sort_order) {
        (SortField::Endpoint, SortOrder::Asc) => {
            sorted.sort_by(|a, b| a.endpoint.model_id.cmp(&b.endpoint.model_id))
        }
        (SortField::Endpoint, SortOrder::Desc) => {
            sorted.sort_by(|a, b| b.endpoint.model_id.cmp(&a.endpoint.model_id))
        }
    }
    sorted
}

/// Pagination state for the given params and unfiltered record count.
pub fn pagination_for(params: &QueryParams, total_item_count: usize) -> Pagination {
    Pagination {
        page_index: params.page.saturating_sub(1),
        page_size: params.per_page,
        page_size_options: PER_PAGE_VALUES.to_vec(),
        total_item_count,
    }
}

/// The rows on the current page. Bounds never exceed `sorted.len()`.
pub fn page_slice(sorted: &[InferenceEndpointRow], pagination: &Pagination) -> Vec<InferenceEndpointRow> {
    let page_size = if pagination.page_size == 0 {
        DEFAULT_TABLE_LIMIT
    } else {
        pagination.page_size
    };
    let start = pagination.page_index.saturating_mul(page_size).min(sorted.len());
    let end = start.saturating_add(page_size).min(sorted.len());
    sorted[start..end].to_vec()
}

/// Full projection.
pub fn project_table(
    endpoints: &[InferenceEndpoint],
    params: &QueryParams,
    filter_options: &FilterOptions,
    search_key: &str,
    statuses: &HashMap<String, DeploymentStatus>,
) -> TableProjection {
    let table_data = filter_rows(endpoints, filter_options, search_key, statuses);
    let sorted_table_data = sort_rows(&table_data, params);
    let pagination = pagination_for(params, endpoints.len());
    let paginated_sorted_table_data = page_slice(&sorted_table_data, &pagination);

    TableProjection {
        table_data,
        sorted_table_data,
        paginated_sorted_table_data,
        pagination,
        sorting: Sorting {
            field: params.sort_field,
            direction: params.sort_order,
        },
    }
}
