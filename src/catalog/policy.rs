use serde::{Deserialize, Serialize};

/// Tunable lending rules.
///
/// The special-edition gate is a configuration value: different deployments
/// have run with thresholds of 1 and 3, so nothing in the crate hardcodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    /// Completed (returned) loans a reader needs before a special edition
    /// may be borrowed.
    pub special_edition_threshold: u32,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            special_edition_threshold: 3,
        }
    }
}

impl LendingPolicy {
    pub fn new(special_edition_threshold: u32) -> Self {
        Self {
            special_edition_threshold,
        }
    }

    /// Load a policy from a JSON document, e.g. `{"special_edition_threshold": 1}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(LendingPolicy::default().special_edition_threshold, 3);
    }

    #[test]
    fn test_from_json() {
        let policy = LendingPolicy::from_json(r#"{"special_edition_threshold": 1}"#).unwrap();
        assert_eq!(policy.special_edition_threshold, 1);
    }

    #[test]
    fn test_from_json_empty_object_uses_default() {
        let policy = LendingPolicy::from_json("{}").unwrap();
        assert_eq!(policy, LendingPolicy::default());
    }
}
