//! HTTP adapters - REST API implementations.
//!
//! Each route group has its own module with `dto`, `handlers`, and `routes`;
//! they share [`AppState`], the [`ApiError`] response mapping, and the
//! validating extractors.

pub mod assistant;
pub mod entities;
pub mod error;
pub mod extract;
pub mod inference;
pub mod middleware;
pub mod router;
pub mod saved_query;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use extract::{ValidatedJson, ValidatedQuery};
pub use router::create_router;
pub use state::{AppState, PluginName};
