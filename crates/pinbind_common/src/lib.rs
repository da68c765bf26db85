//! Shared foundational types used across the pinbind crates.
//!
//! This crate provides interned identifiers for hierarchical signal paths.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
