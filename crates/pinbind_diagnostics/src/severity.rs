//! Whether a diagnostic stopped a binding operation or only flagged it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is.
///
/// pinbind has two levels. A warning means something was tolerated or
/// skipped (a stale map entry, a refused mode toggle). An error means the
/// requested binding or load did not happen. Errors sort above warnings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Tolerated; the session state is still usable as requested.
    Warning,
    /// The operation was rejected and left state unchanged.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// The lowercase word used in rendered headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
