//! Parsing and validation of pinbind's TOML documents.
//!
//! Three documents are supported:
//!
//! - the **board file**, describing a board's physical resources, which
//!   becomes a [`BoardCatalog`](pinbind_board::BoardCatalog);
//! - the **design file**, listing the I/O requirements of a design, which
//!   becomes a [`SignalCatalog`](pinbind_bind::SignalCatalog);
//! - the **map file**, a [`SavedMap`](pinbind_bind::SavedMap) of bindings
//!   by display name.
//!
//! Problems with individual entries are reported into a
//! [`DiagnosticSink`](pinbind_diagnostics::DiagnosticSink) and the entry is
//! skipped. Only unreadable documents and catalog-wide problems return
//! [`ConfigError`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_board, load_board_from_str, load_design, load_design_from_str, load_map,
    load_map_from_str, save_map, save_map_to_string,
};
pub use types::*;
