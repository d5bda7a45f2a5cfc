//! Severity levels for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a diagnostic message.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A warning; the operation completed but something deserves attention.
    Warning,
    /// An error; the requested mapping cannot be realized as asked.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warning), "warning");
    }

    #[test]
    fn ordering_is_by_gravity() {
        assert!(Severity::Warning < Severity::Error);
    }
}
