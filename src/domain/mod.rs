//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, auth, errors)
//! - `conversation` - Assistant conversations, messages, replacements, titles
//! - `licensing` - License levels and the assistant's minimum license
//! - `capabilities` - Per-plugin assistant feature flags and tools
//! - `inference` - Inference endpoints and the list-view table projection
//! - `saved_query` - Osquery saved queries
//! - `entities` - Entity discovery enablement

pub mod capabilities;
pub mod conversation;
pub mod entities;
pub mod foundation;
pub mod inference;
pub mod licensing;
pub mod saved_query;
