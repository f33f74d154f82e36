//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token middleware and the optional-user extractor

pub mod auth;

pub use auth::{auth_middleware, AuthState, OptionalAuth};
