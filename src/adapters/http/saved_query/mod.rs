//! HTTP adapter for osquery saved queries.

mod dto;
mod handlers;
mod routes;

pub use dto::{SavedQueryResponse, UpdateSavedQueryRequestBody, UpdateSavedQueryRequestParams};
pub use routes::saved_query_routes;
