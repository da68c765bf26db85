//! Error types for document loading and validation.

use pinbind_board::CatalogError;

/// Errors that can occur when loading or saving a pinbind document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the document.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// The document could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(String),

    /// A required field is missing from the document.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A document value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The board file has entries that make the whole catalog unusable.
    #[error("board '{board}' has {} fatal catalog error(s)", .errors.len())]
    Catalog {
        /// Name of the board.
        board: String,
        /// The fatal entry errors, in declaration order.
        errors: Vec<CatalogError>,
    },
}
