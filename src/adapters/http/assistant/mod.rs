//! HTTP adapter for the security assistant.

mod dto;
mod handlers;
mod routes;

pub use dto::{EvaluateResponse, ExecuteConnectorRequestBody};
pub use routes::assistant_routes;
