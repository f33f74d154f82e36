//! Inference endpoints and their list-view projection.

mod endpoint;
mod table;

pub use endpoint::{DeploymentStatus, InferenceEndpoint, ServiceProvider, ServiceSettings, TaskType};
pub use table::{
    deployment_status_for, filter_rows, page_slice, pagination_for, project_table, sort_rows,
    FilterOptions, InferenceEndpointRow, Pagination, QueryParams, SortField, SortOrder, Sorting,
    TableProjection, DEFAULT_TABLE_LIMIT, PER_PAGE_VALUES,
};
