//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `ai` - Actions connector client and agent runners
//! - `auth` - Session validation
//! - `http` - axum routes
//! - `memory` - In-memory data clients and repositories
//! - `platform` - Licensing, capability registry, telemetry

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod platform;
