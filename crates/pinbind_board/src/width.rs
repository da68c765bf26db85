//! Directional width triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a signal or resource bit, seen from the design.
///
/// `Input` means data flows from the board into the design (a button),
/// `Output` from the design to the board (an LED).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Board drives the design.
    #[serde(rename = "in", alias = "input")]
    Input,
    /// Design drives the board.
    #[serde(rename = "out", alias = "output")]
    Output,
    /// Bidirectional.
    InOut,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "in"),
            Direction::Output => write!(f, "out"),
            Direction::InOut => write!(f, "inout"),
        }
    }
}

/// A `{in, out, inout}` bit-count triple.
///
/// A well-formed signal requirement has at most one nonzero component.
/// Resources always have exactly one nonzero component (physical) or none
/// (synthetic, whose width adapts to the signal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IoWidth {
    /// Input bits.
    #[serde(rename = "in")]
    pub input: u32,
    /// Output bits.
    #[serde(rename = "out")]
    pub output: u32,
    /// Bidirectional bits.
    pub inout: u32,
}

impl IoWidth {
    /// The all-zero triple.
    pub const ZERO: IoWidth = IoWidth {
        input: 0,
        output: 0,
        inout: 0,
    };

    /// A triple with `n` bits in `direction`.
    pub fn new(direction: Direction, n: u32) -> Self {
        let mut width = Self::ZERO;
        *width.get_mut(direction) = n;
        width
    }

    /// `n` input bits.
    pub fn input(n: u32) -> Self {
        Self::new(Direction::Input, n)
    }

    /// `n` output bits.
    pub fn output(n: u32) -> Self {
        Self::new(Direction::Output, n)
    }

    /// `n` bidirectional bits.
    pub fn inout(n: u32) -> Self {
        Self::new(Direction::InOut, n)
    }

    /// Returns the component for `direction`.
    pub fn get(self, direction: Direction) -> u32 {
        match direction {
            Direction::Input => self.input,
            Direction::Output => self.output,
            Direction::InOut => self.inout,
        }
    }

    /// Returns a mutable reference to the component for `direction`.
    pub fn get_mut(&mut self, direction: Direction) -> &mut u32 {
        match direction {
            Direction::Input => &mut self.input,
            Direction::Output => &mut self.output,
            Direction::InOut => &mut self.inout,
        }
    }

    /// Sum of all three components.
    pub fn total(self) -> u32 {
        self.input + self.output + self.inout
    }

    /// Returns `true` if more than one component is nonzero.
    pub fn is_mixed(self) -> bool {
        [self.input, self.output, self.inout]
            .iter()
            .filter(|&&n| n > 0)
            .count()
            > 1
    }

    /// Returns the single direction of a well-formed, nonempty triple.
    ///
    /// `None` for the zero triple and for mixed triples.
    pub fn direction(self) -> Option<Direction> {
        if self.is_mixed() {
            return None;
        }
        if self.input > 0 {
            Some(Direction::Input)
        } else if self.output > 0 {
            Some(Direction::Output)
        } else if self.inout > 0 {
            Some(Direction::InOut)
        } else {
            None
        }
    }

    /// Direction of the bit at `index`, counting input bits first, then
    /// output bits, then bidirectional bits.
    pub fn direction_of_bit(self, index: u32) -> Option<Direction> {
        if index < self.input {
            Some(Direction::Input)
        } else if index < self.input + self.output {
            Some(Direction::Output)
        } else if index < self.total() {
            Some(Direction::InOut)
        } else {
            None
        }
    }
}

impl std::ops::AddAssign for IoWidth {
    fn add_assign(&mut self, rhs: Self) {
        self.input += rhs.input;
        self.output += rhs.output;
        self.inout += rhs.inout;
    }
}

impl fmt::Display for IoWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{in:{}, out:{}, inout:{}}}",
            self.input, self.output, self.inout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_direction_constructors() {
        assert_eq!(IoWidth::input(4).direction(), Some(Direction::Input));
        assert_eq!(IoWidth::output(1).direction(), Some(Direction::Output));
        assert_eq!(IoWidth::inout(8).total(), 8);
    }

    #[test]
    fn zero_has_no_direction() {
        assert_eq!(IoWidth::ZERO.direction(), None);
        assert!(!IoWidth::ZERO.is_mixed());
    }

    #[test]
    fn mixed_detection() {
        let w = IoWidth {
            input: 2,
            output: 1,
            inout: 0,
        };
        assert!(w.is_mixed());
        assert_eq!(w.direction(), None);
        assert_eq!(w.total(), 3);
    }

    #[test]
    fn bit_directions_follow_in_out_inout_order() {
        let w = IoWidth {
            input: 2,
            output: 1,
            inout: 1,
        };
        assert_eq!(w.direction_of_bit(0), Some(Direction::Input));
        assert_eq!(w.direction_of_bit(1), Some(Direction::Input));
        assert_eq!(w.direction_of_bit(2), Some(Direction::Output));
        assert_eq!(w.direction_of_bit(3), Some(Direction::InOut));
        assert_eq!(w.direction_of_bit(4), None);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut acc = IoWidth::ZERO;
        acc += IoWidth::input(3);
        acc += IoWidth::output(2);
        acc += IoWidth::input(1);
        assert_eq!(
            acc,
            IoWidth {
                input: 4,
                output: 2,
                inout: 0
            }
        );
    }

    #[test]
    fn display_and_serde_names() {
        assert_eq!(IoWidth::input(4).to_string(), "{in:4, out:0, inout:0}");
        let json = serde_json::to_string(&IoWidth::output(2)).unwrap();
        assert_eq!(json, r#"{"in":0,"out":2,"inout":0}"#);
    }

    #[test]
    fn direction_serde_names() {
        assert_eq!(serde_json::to_string(&Direction::Input).unwrap(), "\"in\"");
        let back: Direction = serde_json::from_str("\"output\"").unwrap();
        assert_eq!(back, Direction::Output);
        let back: Direction = serde_json::from_str("\"inout\"").unwrap();
        assert_eq!(back, Direction::InOut);
    }
}
