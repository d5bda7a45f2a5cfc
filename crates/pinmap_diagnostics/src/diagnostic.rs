//! Structured diagnostic messages with severity, codes, and subjects.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// Diagnostics are the mechanism for reporting capacity failures and other
/// user-visible conditions. There is no source text in this system, so
/// instead of a source span each diagnostic may carry a *subject*: the
/// display name of the design port it is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The display name of the design port this diagnostic is about, if any.
    /// Board-level diagnostics have no subject.
    pub subject: Option<String>,
    /// Explanatory footnotes (rendered as `note: ...`).
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
        }
    }

    /// Sets the subject port of this diagnostic.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{INSUFFICIENT_RESOURCES, PORT_NOT_PLACEABLE};

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(INSUFFICIENT_RESOURCES, "board is full");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "board is full");
        assert_eq!(format!("{}", diag.code), "E101");
        assert!(diag.subject.is_none());
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::error(PORT_NOT_PLACEABLE, "cannot be placed")
            .with_subject("LED: /LED1")
            .with_note("try enabling alternate mapping");
        assert_eq!(diag.subject.as_deref(), Some("LED: /LED1"));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::warning(PORT_NOT_PLACEABLE, "odd mapping").with_subject("PIN: /P1");
        let json = serde_json::to_string(&diag).unwrap();
        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diag);
    }
}
