//! Diagnostic creation, severity management, and rendering.
//!
//! Every expected validation problem in pinbind (an incompatible binding
//! request, a malformed catalog entry, a stale saved map) is reported as a
//! [`Diagnostic`] into a shared [`DiagnosticSink`] instead of being returned
//! as an error. Callers inspect the sink afterwards and render it with a
//! [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
