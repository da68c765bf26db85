//! Board resources and the width/type compatibility rule.

use crate::electrical::{ActiveLevel, Electrical};
use crate::io_type::IoType;
use crate::width::{Direction, IoWidth};
use serde::{Deserialize, Serialize};

/// An unvalidated resource declaration, as produced by a catalog loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Unique, human-readable label (e.g. `LEDR`, `SW`).
    pub label: String,
    /// Resource type.
    pub io_type: IoType,
    /// Declared width; `None` takes it from the number of pin locations.
    pub width: Option<u32>,
    /// One pin location per bit, least significant bit first.
    pub pins: Vec<String>,
    /// Electrical attributes.
    pub electrical: Electrical,
}

impl ResourceSpec {
    /// Creates a declaration with default electrical attributes whose width
    /// follows the pin list.
    pub fn new<I, S>(label: impl Into<String>, io_type: IoType, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            io_type,
            width: None,
            pins: pins.into_iter().map(Into::into).collect(),
            electrical: Electrical::default(),
        }
    }

    /// Sets the electrical attributes.
    pub fn with_electrical(mut self, electrical: Electrical) -> Self {
        self.electrical = electrical;
        self
    }

    /// Sets the declared width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

/// A validated resource in a [`BoardCatalog`](crate::BoardCatalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResource {
    /// Unique label within the catalog.
    pub label: String,
    /// Resource type.
    pub io_type: IoType,
    /// Bits per direction. Zero for synthetic resources.
    pub width: IoWidth,
    /// One pin location per bit. Empty for synthetic resources.
    pub pins: Vec<String>,
    /// Electrical attributes.
    pub electrical: Electrical,
}

impl BoardResource {
    pub(crate) fn synthetic(io_type: IoType) -> Self {
        Self {
            label: io_type.name().to_string(),
            io_type,
            width: IoWidth::ZERO,
            pins: Vec::new(),
            electrical: Electrical::default(),
        }
    }

    /// Returns `true` for resources without physical pins.
    pub fn is_synthetic(&self) -> bool {
        self.io_type.is_synthetic()
    }

    /// Number of physical bits. Zero for synthetic resources.
    pub fn bit_count(&self) -> u32 {
        self.width.total()
    }

    /// Returns `true` if the resource is active high.
    pub fn is_active_high(&self) -> bool {
        self.electrical.active == ActiveLevel::High
    }

    /// Bits available to a signal flowing in `direction`.
    fn available(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Input => self.width.input + self.width.inout,
            Direction::Output => self.width.output + self.width.inout,
            Direction::InOut => self.width.inout,
        }
    }

    /// Returns `true` if this resource can serve a signal of width
    /// `required` whose acceptable type is `required_type`.
    ///
    /// Multi-bit signals need the same type (or the [`IoType::Bus`]
    /// wildcard) and an exact width match on the compatible side.
    /// Single-bit signals need the same type (or the [`IoType::Pin`]
    /// wildcard) and at least one bit on the compatible side. Synthetic
    /// resources accept any width and type of the right direction. Empty and
    /// mixed-direction requirements are never compatible.
    pub fn is_compatible(&self, required: IoWidth, required_type: IoType) -> bool {
        let Some(direction) = required.direction() else {
            return false;
        };
        if self.is_synthetic() {
            return self.io_type.synthetic_accepts(direction);
        }
        let available = self.available(direction);
        if required.total() > 1 {
            (required_type == IoType::Bus || required_type == self.io_type)
                && available == required.total()
        } else {
            (required_type == IoType::Pin || required_type == self.io_type) && available >= 1
        }
    }

    /// Pin locations for the whole resource or for a single bit.
    pub fn locations(&self, bit: Option<u32>) -> &[String] {
        match bit {
            Some(b) => self
                .pins
                .get(b as usize..b as usize + 1)
                .unwrap_or_default(),
            None => &self.pins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical(io_type: IoType, width: u32) -> BoardResource {
        let direction = io_type.direction().unwrap();
        BoardResource {
            label: format!("{io_type}{width}"),
            io_type,
            width: IoWidth::new(direction, width),
            pins: (0..width).map(|i| format!("P{i}")).collect(),
            electrical: Electrical::default(),
        }
    }

    #[test]
    fn led_matches_led_output() {
        let led = physical(IoType::Led, 1);
        assert!(led.is_compatible(IoWidth::output(1), IoType::Led));
        assert!(!led.is_compatible(IoWidth::input(1), IoType::Led));
        assert!(!led.is_compatible(IoWidth::output(1), IoType::Button));
    }

    #[test]
    fn single_bit_wildcard_matches_any_type() {
        let button = physical(IoType::Button, 1);
        assert!(button.is_compatible(IoWidth::input(1), IoType::Pin));
        // sufficiency: one input bit out of a four-bit bank
        let dip = physical(IoType::DipSwitch, 4);
        assert!(dip.is_compatible(IoWidth::input(1), IoType::Pin));
        assert!(!dip.is_compatible(IoWidth::output(1), IoType::Pin));
    }

    #[test]
    fn multi_bit_wildcard_needs_exact_width() {
        let dip = physical(IoType::DipSwitch, 4);
        assert!(dip.is_compatible(IoWidth::input(4), IoType::Bus));
        assert!(!dip.is_compatible(IoWidth::input(3), IoType::Bus));
        assert!(!dip.is_compatible(IoWidth::input(5), IoType::Bus));
    }

    #[test]
    fn multi_bit_named_type_must_match() {
        let seg = physical(IoType::SevenSegment, 8);
        assert!(seg.is_compatible(IoWidth::output(8), IoType::SevenSegment));
        assert!(!seg.is_compatible(IoWidth::output(8), IoType::LedBar));
        assert!(!seg.is_compatible(IoWidth::output(7), IoType::SevenSegment));
    }

    #[test]
    fn two_bits_never_fit_one_pin() {
        let pin = physical(IoType::Pin, 1);
        assert!(!pin.is_compatible(IoWidth::input(2), IoType::Pin));
        assert!(!pin.is_compatible(IoWidth::input(2), IoType::Bus));
        assert!(pin.is_compatible(IoWidth::input(1), IoType::Pin));
    }

    #[test]
    fn bidirectional_resources_serve_every_direction() {
        let bus = physical(IoType::Bus, 8);
        assert!(bus.is_compatible(IoWidth::input(8), IoType::Bus));
        assert!(bus.is_compatible(IoWidth::output(8), IoType::Bus));
        assert!(bus.is_compatible(IoWidth::inout(8), IoType::Bus));
        let dip = physical(IoType::DipSwitch, 8);
        assert!(!dip.is_compatible(IoWidth::inout(8), IoType::Bus));
    }

    #[test]
    fn mixed_and_empty_requirements_are_rejected() {
        let bus = physical(IoType::Bus, 3);
        let mixed = IoWidth {
            input: 2,
            output: 1,
            inout: 0,
        };
        assert!(!bus.is_compatible(mixed, IoType::Bus));
        assert!(!bus.is_compatible(IoWidth::ZERO, IoType::Bus));
        assert!(!BoardResource::synthetic(IoType::AllZero).is_compatible(mixed, IoType::Bus));
    }

    #[test]
    fn synthetic_resources_follow_direction_only() {
        let zero = BoardResource::synthetic(IoType::AllZero);
        assert!(zero.is_compatible(IoWidth::input(16), IoType::DipSwitch));
        assert!(zero.is_compatible(IoWidth::input(1), IoType::Button));
        assert!(!zero.is_compatible(IoWidth::output(1), IoType::Led));
        let open = BoardResource::synthetic(IoType::Unconnected);
        assert!(open.is_compatible(IoWidth::output(8), IoType::SevenSegment));
        assert!(!open.is_compatible(IoWidth::input(1), IoType::Button));
    }

    #[test]
    fn locations_by_bit() {
        let dip = physical(IoType::DipSwitch, 3);
        assert_eq!(dip.locations(None).len(), 3);
        assert_eq!(dip.locations(Some(1)), ["P1".to_string()]);
        assert!(dip.locations(Some(7)).is_empty());
    }
}
