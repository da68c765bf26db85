//! Pin-binding resolver for pinbind.
//!
//! Matches the I/O signals a design needs ([`SignalCatalog`]) against the
//! resources a board offers ([`BoardCatalog`](pinbind_board::BoardCatalog)):
//!
//! - [`BindingResolver`] is the allocation engine. It validates and stores
//!   bindings, evicts whatever a new binding collides with, and numbers the
//!   final physical bindings for the generated port vectors.
//! - [`BindingSession`] addresses signals and resources by display name,
//!   manages whole versus per-bit mapping, and produces the
//!   [`PinAssignment`] records and [`SavedMap`] snapshots.
//!
//! Expected problems never surface as `Err`: they are reported into the
//! shared [`DiagnosticSink`](pinbind_diagnostics::DiagnosticSink) and the
//! request has no effect.
//!
//! The resolver is single-writer. Wrap it in a mutex if several threads
//! need to bind or finalize.

#![warn(missing_docs)]

pub mod assignment;
pub mod map;
pub mod resolver;
pub mod session;
pub mod signal;

pub use assignment::PinAssignment;
pub use map::{SavedBinding, SavedMap};
pub use resolver::{Binding, BindingResolver, SequenceNumbers};
pub use session::BindingSession;
pub use signal::{Signal, SignalCatalog, SignalEntry, SignalError, SignalKey, SignalKind};
