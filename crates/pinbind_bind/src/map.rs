//! Saved binding maps, keyed by display names.

use serde::{Deserialize, Serialize};

/// A snapshot of a session's bindings that survives design rebuilds, as
/// long as the display names still resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMap {
    /// Name of the board the map was made for.
    pub board: String,
    /// One entry per binding.
    #[serde(default)]
    pub bindings: Vec<SavedBinding>,
}

/// One saved binding.
///
/// Exactly one of `resource` and `constant` is expected to be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedBinding {
    /// Signal display name, e.g. `LED:/main/LED1` or `Pin:/main/sw#2`.
    pub signal: String,
    /// Resource display name, e.g. `LEDR` or `SW#3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Constant value for bindings onto the constant resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_skips_absent_fields() {
        let map = SavedMap {
            board: "DE0".to_string(),
            bindings: vec![
                SavedBinding {
                    signal: "LED:/main/LED1".to_string(),
                    resource: Some("LEDR#0".to_string()),
                    constant: None,
                },
                SavedBinding {
                    signal: "Bus:/main/cfg".to_string(),
                    resource: None,
                    constant: Some(5),
                },
            ],
        };
        let json = serde_json::to_string(&map).unwrap();
        assert!(!json.contains("null"));
        let back: SavedMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
