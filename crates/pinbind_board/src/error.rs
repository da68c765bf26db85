//! Errors detected while building a board catalog.

use crate::io_type::IoType;

/// A malformed catalog entry.
///
/// Most problems only disqualify the offending entry, which the loader skips
/// after reporting it. [`CatalogError::is_fatal`] marks the ones that make
/// the whole catalog unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The entry has an empty label.
    #[error("resource #{index} has an empty label")]
    EmptyLabel {
        /// Position of the entry in declaration order.
        index: usize,
    },

    /// The label is used by an earlier entry or by a synthetic resource.
    #[error("duplicate resource label '{label}'")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// Synthetic resources are provided by every catalog and cannot be declared.
    #[error("resource '{label}' declares synthetic type {io_type}")]
    SyntheticDeclared {
        /// Label of the entry.
        label: String,
        /// The synthetic type it tried to use.
        io_type: IoType,
    },

    /// The declared width is outside the type's allowed range.
    #[error("resource '{label}' has width {width}, but {io_type} allows {min}..={max}")]
    InvalidWidth {
        /// Label of the entry.
        label: String,
        /// Type of the entry.
        io_type: IoType,
        /// The declared width.
        width: u32,
        /// Smallest allowed width.
        min: u32,
        /// Largest allowed width.
        max: u32,
    },

    /// A bit has no pin location, or its location is blank.
    #[error("resource '{label}' is missing a pin location for bit {bit}")]
    MissingPinLocation {
        /// Label of the entry.
        label: String,
        /// First bit without a location.
        bit: u32,
    },

    /// More pin locations than bits.
    #[error("resource '{label}' lists {pins} pin locations for {width} bits")]
    ExtraPinLocations {
        /// Label of the entry.
        label: String,
        /// Number of bits.
        width: u32,
        /// Number of locations given.
        pins: usize,
    },
}

impl CatalogError {
    /// Returns `true` if the catalog must not be used at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::DuplicateLabel { .. })
    }

    /// The label of the offending entry, when it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            CatalogError::EmptyLabel { .. } => None,
            CatalogError::DuplicateLabel { label }
            | CatalogError::SyntheticDeclared { label, .. }
            | CatalogError::InvalidWidth { label, .. }
            | CatalogError::MissingPinLocation { label, .. }
            | CatalogError::ExtraPinLocations { label, .. } => Some(label),
        }
    }
}
