//! Electrical attributes carried through to pin-constraint generation.

use serde::{Deserialize, Serialize};

/// Pull resistor behaviour of a pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullBehavior {
    /// No pull resistor.
    #[default]
    None,
    /// Weak pull-up.
    Up,
    /// Weak pull-down.
    Down,
    /// Bus keeper.
    Keeper,
}

/// Logic level at which a resource is considered active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveLevel {
    /// Active when driven high.
    #[default]
    High,
    /// Active when driven low.
    Low,
}

impl ActiveLevel {
    /// Returns `true` for [`ActiveLevel::High`].
    pub fn is_high(self) -> bool {
        self == ActiveLevel::High
    }
}

/// The electrical properties of a physical resource.
///
/// pinbind does not interpret these beyond the active level; they are
/// passed to the constraint generator untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Electrical {
    /// Pull resistor behaviour.
    #[serde(default)]
    pub pull: PullBehavior,
    /// Vendor I/O standard name (e.g. `LVCMOS33`); `None` means vendor default.
    #[serde(default)]
    pub io_standard: Option<String>,
    /// Drive strength in milliamperes; `None` means vendor default.
    #[serde(default)]
    pub drive_strength: Option<u8>,
    /// Active level of the resource.
    #[serde(default)]
    pub active: ActiveLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let e = Electrical::default();
        assert_eq!(e.pull, PullBehavior::None);
        assert!(e.active.is_high());
        assert!(e.io_standard.is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let e = Electrical {
            pull: PullBehavior::Up,
            io_standard: Some("LVCMOS33".to_string()),
            drive_strength: Some(8),
            active: ActiveLevel::Low,
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"low\""));
        let back: Electrical = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
