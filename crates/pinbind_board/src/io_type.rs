//! Resource types, their implied direction, and their width rules.

use crate::width::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a type (or a signal) is a single bit or a multi-bit group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthClass {
    /// Exactly one bit.
    Single,
    /// Two or more bits.
    Multi,
}

impl WidthClass {
    /// The class of a signal with `total` bits.
    pub fn of_total(total: u32) -> Self {
        if total > 1 {
            WidthClass::Multi
        } else {
            WidthClass::Single
        }
    }
}

/// The inclusive range of widths a resource type may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthRange {
    /// Smallest allowed width.
    pub min: u32,
    /// Largest allowed width.
    pub max: u32,
}

impl WidthRange {
    const fn fixed(n: u32) -> Self {
        Self { min: n, max: n }
    }

    /// Returns `true` if the width cannot be configured.
    pub fn is_fixed(self) -> bool {
        self.min == self.max
    }

    /// Returns `true` if `width` lies within the range.
    pub fn contains(self, width: u32) -> bool {
        (self.min..=self.max).contains(&width)
    }
}

/// The type of a board resource, also used as a signal's acceptable type.
///
/// Physical types have a fixed direction and either a fixed width or a
/// board-configurable width. [`IoType::Pin`] and [`IoType::Bus`] double as
/// the single-bit and multi-bit wildcards when used as a required type.
/// Synthetic types have no pins and adapt their width to the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoType {
    /// Single LED.
    Led,
    /// Single push button.
    Button,
    /// Raw bidirectional pin; the single-bit wildcard.
    Pin,
    /// Bank of DIP switches.
    DipSwitch,
    /// Bar of LEDs.
    LedBar,
    /// Seven-segment display with decimal point.
    SevenSegment,
    /// Seven-segment display without decimal point.
    SevenSegmentNoDp,
    /// Red/green/blue LED.
    RgbLed,
    /// Raw bidirectional bus; the multi-bit wildcard.
    Bus,
    /// Drives an input with a user-chosen constant.
    Constant,
    /// Drives every bit of an input low.
    AllZero,
    /// Drives every bit of an input high.
    AllOne,
    /// Leaves an output unconnected.
    Unconnected,
}

impl IoType {
    /// All physical types, in declaration order.
    pub const PHYSICAL: [IoType; 9] = [
        IoType::Led,
        IoType::Button,
        IoType::Pin,
        IoType::DipSwitch,
        IoType::LedBar,
        IoType::SevenSegment,
        IoType::SevenSegmentNoDp,
        IoType::RgbLed,
        IoType::Bus,
    ];

    /// All synthetic types, in the order they are appended to a catalog.
    pub const SYNTHETIC: [IoType; 4] = [
        IoType::AllZero,
        IoType::AllOne,
        IoType::Constant,
        IoType::Unconnected,
    ];

    /// Returns `true` for resources that have no physical pins.
    pub fn is_synthetic(self) -> bool {
        matches!(
            self,
            IoType::Constant | IoType::AllZero | IoType::AllOne | IoType::Unconnected
        )
    }

    /// The direction of every bit of a physical resource of this type.
    ///
    /// Synthetic types return `None`; see [`IoType::synthetic_accepts`].
    pub fn direction(self) -> Option<Direction> {
        match self {
            IoType::Button | IoType::DipSwitch => Some(Direction::Input),
            IoType::Led
            | IoType::LedBar
            | IoType::SevenSegment
            | IoType::SevenSegmentNoDp
            | IoType::RgbLed => Some(Direction::Output),
            IoType::Pin | IoType::Bus => Some(Direction::InOut),
            IoType::Constant | IoType::AllZero | IoType::AllOne | IoType::Unconnected => None,
        }
    }

    /// Returns `true` if a synthetic resource of this type can serve a
    /// signal flowing in `direction`.
    ///
    /// Value sources only feed design inputs; `Unconnected` only terminates
    /// outputs and bidirectional signals. Always `false` for physical types.
    pub fn synthetic_accepts(self, direction: Direction) -> bool {
        match self {
            IoType::Constant | IoType::AllZero | IoType::AllOne => direction == Direction::Input,
            IoType::Unconnected => direction != Direction::Input,
            _ => false,
        }
    }

    /// The allowed widths of a physical resource of this type.
    ///
    /// Synthetic types return `None`.
    pub fn width_range(self) -> Option<WidthRange> {
        let range = match self {
            IoType::Led | IoType::Button | IoType::Pin => WidthRange::fixed(1),
            IoType::SevenSegment => WidthRange::fixed(8),
            IoType::SevenSegmentNoDp => WidthRange::fixed(7),
            IoType::RgbLed => WidthRange::fixed(3),
            IoType::DipSwitch | IoType::LedBar => WidthRange { min: 2, max: 32 },
            IoType::Bus => WidthRange { min: 2, max: 128 },
            IoType::Constant | IoType::AllZero | IoType::AllOne | IoType::Unconnected => {
                return None
            }
        };
        Some(range)
    }

    /// The width class of this type, or `None` for synthetic types.
    pub fn width_class(self) -> Option<WidthClass> {
        self.width_range().map(|range| {
            if range.max == 1 {
                WidthClass::Single
            } else {
                WidthClass::Multi
            }
        })
    }

    /// The wildcard type for a width class.
    pub fn wildcard(class: WidthClass) -> IoType {
        match class {
            WidthClass::Single => IoType::Pin,
            WidthClass::Multi => IoType::Bus,
        }
    }

    /// Returns `true` for [`IoType::Pin`] and [`IoType::Bus`].
    pub fn is_wildcard(self) -> bool {
        matches!(self, IoType::Pin | IoType::Bus)
    }

    /// The name used in display identities, e.g. `DipSwitch`.
    pub fn name(self) -> &'static str {
        match self {
            IoType::Led => "LED",
            IoType::Button => "Button",
            IoType::Pin => "Pin",
            IoType::DipSwitch => "DipSwitch",
            IoType::LedBar => "LedBar",
            IoType::SevenSegment => "SevenSegment",
            IoType::SevenSegmentNoDp => "SevenSegmentNoDp",
            IoType::RgbLed => "RgbLed",
            IoType::Bus => "Bus",
            IoType::Constant => "Constant",
            IoType::AllZero => "AllZero",
            IoType::AllOne => "AllOne",
            IoType::Unconnected => "Unconnected",
        }
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type '{0}'")]
pub struct ParseIoTypeError(pub String);

impl FromStr for IoType {
    type Err = ParseIoTypeError;

    /// Parses a display name (`DipSwitch`); matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IoType::PHYSICAL
            .iter()
            .chain(IoType::SYNTHETIC.iter())
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIoTypeError(s.to_string()))
    }
}

/// Picks the first type in `types` whose width class is `class`.
///
/// Falls back to the wildcard for `class` when no entry qualifies. Synthetic
/// entries never qualify.
pub fn first_of_class(types: &[IoType], class: WidthClass) -> IoType {
    types
        .iter()
        .copied()
        .find(|t| t.width_class() == Some(class))
        .unwrap_or_else(|| IoType::wildcard(class))
}
