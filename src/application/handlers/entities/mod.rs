//! Entity manager handlers.

mod disable_entity_discovery;

pub use disable_entity_discovery::{
    DisableEntityDiscoveryCommand, DisableEntityDiscoveryError, DisableEntityDiscoveryHandler,
};
