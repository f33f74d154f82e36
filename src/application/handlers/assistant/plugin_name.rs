//! Originating plugin resolution.
//!
//! Browser requests carry an `x-kbn-context` header holding URL-encoded JSON
//! such as `{"name":"securitySolutionUI"}`. Background requests carry none.

use serde::Deserialize;
use tracing::error;

/// Header naming the plugin a request originates from.
pub const KBN_CONTEXT_HEADER: &str = "x-kbn-context";

/// Where the plugin name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginNameSource {
    Header(String),
    /// The header was absent or unusable; `reason` says why when it was present.
    Default { name: String, reason: Option<String> },
}

impl PluginNameSource {
    pub fn name(&self) -> &str {
        match self {
            PluginNameSource::Header(name) => name,
            PluginNameSource::Default { name, .. } => name,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            PluginNameSource::Header(name) => name,
            PluginNameSource::Default { name, .. } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct KbnContext {
    name: Option<String>,
}

/// Resolves the plugin name from the raw `x-kbn-context` header value.
///
/// Never fails: malformed headers fall back to `default_plugin_name` and are
/// logged.
pub fn plugin_name_from_header(header: Option<&str>, default_plugin_name: &str) -> PluginNameSource {
    let Some(raw) = header else {
        return PluginNameSource::Default {
            name: default_plugin_name.to_string(),
            reason: None,
        };
    };

    let parsed = urlencoding::decode(raw)
        .map_err(|e| e.to_string())
        .and_then(|decoded| {
            serde_json::from_str::<KbnContext>(&decoded).map_err(|e| e.to_string())
        })
        .and_then(|ctx| ctx.name.ok_or_else(|| "context has no name".to_string()));

    match parsed {
        Ok(name) => PluginNameSource::Header(name),
        Err(reason) => {
            error!(
                reason = %reason,
                "Error determining source plugin for selecting tools, using {}.",
                default_plugin_name
            );
            PluginNameSource::Default {
                name: default_plugin_name.to_string(),
                reason: Some(reason),
            }
        }
    }
}
