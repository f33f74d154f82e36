//! HTTP adapter for the entity manager.

mod dto;
mod handlers;
mod routes;

pub use dto::{DisableEnablementQuery, PingResponse};
pub use routes::entity_routes;
