//! HTTP adapter for the inference endpoints list.

mod dto;
mod handlers;
mod routes;

pub use dto::InferenceTableQuery;
pub use routes::inference_routes;
