//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number, e.g.
/// `E302` for a bind width mismatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Unknown signal, resource or bit index handed to the resolver.
    pub const UNKNOWN_ENTITY: Self = Self::new(Category::Error, 301);
    /// Signal-side and resource-side bit counts differ.
    pub const BIT_COUNT_MISMATCH: Self = Self::new(Category::Error, 302);
    /// Width or direction of the signal cannot be served by the resource.
    pub const INCOMPATIBLE_BINDING: Self = Self::new(Category::Error, 303);
    /// A constant value does not fit the signal width.
    pub const CONSTANT_OVERFLOW: Self = Self::new(Category::Error, 304);
    /// A whole-signal name was used while the signal is mapped per bit, or
    /// the reverse.
    pub const MODE_MISMATCH: Self = Self::new(Category::Error, 305);
    /// A signal mixes more than one direction in a whole-signal request.
    pub const MIXED_DIRECTION: Self = Self::new(Category::Warning, 310);
    /// Toggling per-bit mapping was refused because bindings exist.
    pub const ALTERNATE_REFUSED: Self = Self::new(Category::Warning, 311);
    /// A saved map entry could not be applied.
    pub const STALE_MAP_ENTRY: Self = Self::new(Category::Warning, 312);
    /// A saved map was recorded against a different board.
    pub const BOARD_MISMATCH: Self = Self::new(Category::Warning, 313);
    /// A catalog entry has a missing, blank or surplus pin location.
    pub const MISSING_PIN_LOCATION: Self = Self::new(Category::Warning, 320);
    /// A catalog entry has a width outside its type's range.
    pub const INVALID_WIDTH: Self = Self::new(Category::Warning, 321);
    /// A catalog entry uses an unknown or non-declarable type.
    pub const INVALID_TYPE: Self = Self::new(Category::Warning, 322);
    /// Two catalog entries share a label.
    pub const DUPLICATE_LABEL: Self = Self::new(Category::Error, 323);
    /// A design entry is malformed (empty path, label/width disagreement).
    pub const MALFORMED_SIGNAL: Self = Self::new(Category::Error, 324);
    /// Two design entries share a path.
    pub const DUPLICATE_PATH: Self = Self::new(Category::Error, 325);
    /// A catalog entry is malformed in some other way (e.g. no label).
    pub const MALFORMED_RESOURCE: Self = Self::new(Category::Warning, 326);
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
