//! Finalized binding records handed to the HDL and constraint generators.

use crate::resolver::SequenceNumbers;
use pinbind_board::{Direction, Electrical, IoType};
use serde::Serialize;

/// Everything a generator needs to wire one binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinAssignment {
    /// Signal display name.
    pub signal: String,
    /// Hierarchical path of the signal.
    pub path: String,
    /// Signal bit for per-bit bindings.
    pub bit: Option<u32>,
    /// Pin label of the signal bit, for per-bit bindings.
    pub label: Option<String>,
    /// Direction of the bound signal unit.
    pub direction: Direction,
    /// Number of bound bits.
    pub width: u32,
    /// Resource display name.
    pub resource: String,
    /// Type of the serving resource.
    pub resource_type: IoType,
    /// Port-vector offsets; `None` for synthetic resources or before
    /// finalization.
    pub sequence: Option<SequenceNumbers>,
    /// Pin locations, least significant bit first. Empty for synthetic
    /// resources.
    pub locations: Vec<String>,
    /// Electrical attributes of physical resources.
    pub electrical: Option<Electrical>,
    /// Whether the generator must insert an inverter.
    pub inverted: bool,
    /// Driven value for constant bindings.
    pub constant: Option<u64>,
}

impl PinAssignment {
    /// Returns `true` if the binding consumes physical pins.
    pub fn is_physical(&self) -> bool {
        !self.resource_type.is_synthetic()
    }
}
