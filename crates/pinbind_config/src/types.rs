//! Document types deserialized from pinbind's TOML files.
//!
//! Resource and signal types are kept as strings here so that an unknown
//! type name only disqualifies its own entry.

use pinbind_bind::SignalKind;
use pinbind_board::{ActiveLevel, Direction, Electrical, PullBehavior};
use serde::{Deserialize, Serialize};

/// A board file: one board and its physical resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardFile {
    /// Board metadata.
    pub board: BoardMeta,
    /// Physical resources in declaration order.
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

/// Board metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardMeta {
    /// Board name, recorded in saved maps.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// One `[[resources]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceEntry {
    /// Unique label, e.g. `LEDR`.
    pub label: String,
    /// Type name, e.g. `dip_switch` or `DipSwitch`.
    #[serde(rename = "type")]
    pub io_type: String,
    /// Width; defaults to the number of pins.
    #[serde(default)]
    pub width: Option<u32>,
    /// Pin locations, least significant bit first.
    #[serde(default)]
    pub pins: Vec<String>,
    /// Vendor I/O standard.
    #[serde(default)]
    pub io_standard: Option<String>,
    /// Pull resistor behaviour.
    #[serde(default)]
    pub pull: PullBehavior,
    /// Drive strength in milliamperes.
    #[serde(default)]
    pub drive_strength: Option<u8>,
    /// Active level.
    #[serde(default)]
    pub active: ActiveLevel,
}

impl ResourceEntry {
    /// The electrical attributes of this entry.
    pub fn electrical(&self) -> Electrical {
        Electrical {
            pull: self.pull,
            io_standard: self.io_standard.clone(),
            drive_strength: self.drive_strength,
            active: self.active,
        }
    }
}

/// A design file: the I/O requirements of one design.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DesignFile {
    /// Design metadata.
    pub design: DesignMeta,
    /// One entry per port or I/O component.
    #[serde(default)]
    pub signals: Vec<SignalEntryDef>,
}

/// Design metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DesignMeta {
    /// Name of the top-level circuit.
    pub top: String,
}

/// One `[[signals]]` entry.
///
/// Ports may give `direction` and `width` instead of label lists; their
/// labels are then derived from the last path segment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalEntryDef {
    /// Hierarchical path, e.g. `/main/LED1`.
    pub path: String,
    /// Port or component.
    #[serde(default = "default_kind")]
    pub kind: SignalKind,
    /// Acceptable type names, primary first.
    #[serde(default)]
    pub types: Vec<String>,
    /// Input pin labels.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output pin labels.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Bidirectional pin labels.
    #[serde(default)]
    pub inouts: Vec<String>,
    /// Port direction, for the shorthand form.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Port width, for the shorthand form.
    #[serde(default)]
    pub width: Option<u32>,
    /// Active level the component expects.
    #[serde(default)]
    pub active: ActiveLevel,
}

fn default_kind() -> SignalKind {
    SignalKind::Component
}

impl SignalEntryDef {
    /// Returns `true` if the entry has any explicit label list.
    pub fn has_labels(&self) -> bool {
        !(self.inputs.is_empty() && self.outputs.is_empty() && self.inouts.is_empty())
    }
}
