//! ListInferenceTableHandler - Query handler for the inference endpoints table.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::inference::{project_table, FilterOptions, QueryParams, TableProjection};
use crate::ports::InferenceEndpointReader;

/// Query for one page of the inference endpoints table.
#[derive(Debug, Clone, Default)]
pub struct ListInferenceTableQuery {
    pub params: QueryParams,
    pub filters: FilterOptions,
    pub search_key: String,
}

/// Handler projecting stored endpoints into table rows.
pub struct ListInferenceTableHandler {
    reader: Arc<dyn InferenceEndpointReader>,
}

impl ListInferenceTableHandler {
    pub fn new(reader: Arc<dyn InferenceEndpointReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListInferenceTableQuery) -> Result<TableProjection, DomainError> {
        let endpoints = self.reader.list_endpoints().await?;
        let statuses = self.reader.deployment_statuses().await?;

        Ok(project_table(
            &endpoints,
            &query.params,
            &query.filters,
            &query.search_key,
            &statuses,
        ))
    }
}
