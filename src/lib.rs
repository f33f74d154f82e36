//! Assistant Console - security assistant backend
//!
//! Serves the AI assistant's connector execute route with its conversation
//! title workflow, plus entity discovery, osquery saved query, and inference
//! endpoint management APIs, each behind the license/user/capability guard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
