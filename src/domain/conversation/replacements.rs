//! Anonymization replacements.
//!
//! Before alert data is sent to an LLM, sensitive values are swapped for
//! opaque tokens. The replacement map records token -> original value so that
//! anything the user sees or we persist can be de-anonymized again.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map from anonymized token to original value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Replacements(BTreeMap<String, String>);

impl Replacements {
    /// Creates an empty replacement map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or overwrites a single replacement.
    pub fn insert(&mut self, anonymized: impl Into<String>, original: impl Into<String>) {
        self.0.insert(anonymized.into(), original.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, anonymized: impl Into<String>, original: impl Into<String>) -> Self {
        self.insert(anonymized, original);
        self
    }

    /// Merges another map into this one; entries in `other` win.
    pub fn merge(&mut self, other: &Replacements) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, anonymized: &str) -> Option<&str> {
        self.0.get(anonymized).map(String::as_str)
    }

    /// Substitutes every anonymized token in `content` with its original value.
    ///
    /// Longer tokens are replaced first so a token that prefixes another one
    /// cannot clobber it.
    pub fn deanonymize(&self, content: &str) -> String {
        let mut tokens: Vec<(&String, &String)> = self.0.iter().collect();
        tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut result = content.to_string();
        for (anonymized, original) in tokens {
            if anonymized.is_empty() {
                continue;
            }
            result = result.replace(anonymized.as_str(), original);
        }
        result
    }
}

impl FromIterator<(String, String)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Replaces anonymized values in a message with their originals.
pub fn replace_anonymized_values_with_original_values(
    message_content: &str,
    replacements: &Replacements,
) -> String {
    replacements.deanonymize(message_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let r = Replacements::new().with("host-1a2b", "web-prod-01");
        assert_eq!(
            replace_anonymized_values_with_original_values("host-1a2b talked to host-1a2b", &r),
            "web-prod-01 talked to web-prod-01"
        );
    }

    #[test]
    fn empty_map_is_identity() {
        assert_eq!(Replacements::new().deanonymize("unchanged"), "unchanged");
    }

    #[test]
    fn longer_tokens_win_over_prefixes() {
        let r = Replacements::new().with("user-1", "alice").with("user-10", "bob");
        assert_eq!(r.deanonymize("user-10 and user-1"), "bob and alice");
    }

    #[test]
    fn merge_overwrites_existing_entries() {
        let mut r = Replacements::new().with("a", "1");
        r.merge(&Replacements::new().with("a", "2").with("b", "3"));
        assert_eq!(r.get("a"), Some("2"));
        assert_eq!(r.len(), 2);
    }
}
