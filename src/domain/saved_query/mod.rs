//! Osquery saved queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{SavedQueryId, Timestamp};

/// Either a single value or a list of values for an ECS mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EcsMappingValue {
    Single(String),
    Many(Vec<String>),
}

/// Where an ECS field gets its value from: an osquery column or a constant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsMappingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EcsMappingValue>,
}

/// ECS field name -> mapping source.
pub type EcsMapping = BTreeMap<String, EcsMappingEntry>;

/// A stored osquery query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: SavedQueryId,
    pub saved_object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecs_mapping: Option<EcsMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebuilt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub updated_at: Timestamp,
}

impl SavedQuery {
    /// Creates a saved query with only the required fields set.
    pub fn new(id: SavedQueryId, query: impl Into<String>) -> Self {
        Self {
            saved_object_id: id.to_string(),
            id,
            description: None,
            query: query.into(),
            ecs_mapping: None,
            version: None,
            platform: None,
            interval: None,
            snapshot: None,
            removed: None,
            prebuilt: None,
            updated_by: None,
            updated_at: Timestamp::now(),
        }
    }

    /// True for queries shipped with the product; those are read-only.
    pub fn is_prebuilt(&self) -> bool {
        self.prebuilt.unwrap_or(false)
    }

    /// Applies a patch; absent fields keep their current value.
    pub fn apply(&mut self, patch: SavedQueryPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if let Some(query) = patch.query {
            self.query = query;
        }
        if patch.ecs_mapping.is_some() {
            self.ecs_mapping = patch.ecs_mapping;
        }
        if patch.version.is_some() {
            self.version = patch.version;
        }
        if patch.platform.is_some() {
            self.platform = patch.platform;
        }
        if patch.interval.is_some() {
            self.interval = patch.interval;
        }
        if patch.snapshot.is_some() {
            self.snapshot = patch.snapshot;
        }
        if patch.removed.is_some() {
            self.removed = patch.removed;
        }
        self.updated_at = Timestamp::now();
    }
}

/// Field changes requested for a saved query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedQueryPatch {
    pub id: Option<SavedQueryId>,
    pub description: Option<String>,
    pub query: Option<String>,
    pub ecs_mapping: Option<EcsMapping>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub interval: Option<u32>,
    pub snapshot: Option<bool>,
    pub removed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_absent_fields() {
        let mut q = SavedQuery::new(SavedQueryId::new("q1").unwrap(), "select 1;");
        q.platform = Some("linux".into());

        q.apply(SavedQueryPatch {
            query: Some("select * from uptime;".into()),
            interval: Some(60),
            ..Default::default()
        });

        assert_eq!(q.query, "select * from uptime;");
        assert_eq!(q.interval, Some(60));
        assert_eq!(q.platform.as_deref(), Some("linux"));
    }

    #[test]
    fn ecs_mapping_value_accepts_string_or_list() {
        let json = r#"{"host.name":{"field":"hostname"},"tags":{"value":["a","b"]},"labels.env":{"value":"prod"}}"#;
        let mapping: EcsMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping["host.name"].field.as_deref(), Some("hostname"));
        assert_eq!(
            mapping["tags"].value,
            Some(EcsMappingValue::Many(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            mapping["labels.env"].value,
            Some(EcsMappingValue::Single("prod".into()))
        );
    }
}
