//! Capability lookup port.
//!
//! Features and tools are registered per plugin. Requests carry the name of
//! the plugin they originate from; handlers resolve what that plugin may use
//! through this port instead of consulting any global registry.

use crate::domain::capabilities::{AssistantFeatures, AssistantTool};

pub trait CapabilityRegistry: Send + Sync {
    /// Features registered for `plugin_name`. Unknown plugins get all-false.
    fn registered_features(&self, plugin_name: &str) -> AssistantFeatures;

    /// Tools registered for `plugin_name`, in registration order.
    fn registered_tools(&self, plugin_name: &str) -> Vec<AssistantTool>;
}
