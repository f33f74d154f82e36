//! Inference endpoint handlers.

mod list_inference_table;

pub use list_inference_table::{ListInferenceTableHandler, ListInferenceTableQuery};
