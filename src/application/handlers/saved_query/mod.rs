//! Osquery saved query handlers.

mod update_saved_query;

pub use update_saved_query::{UpdateSavedQueryCommand, UpdateSavedQueryError, UpdateSavedQueryHandler};
