//! Plain-text rendering of accumulated diagnostics.

use crate::diagnostic::Diagnostic;
use std::fmt::Write;

/// Renders diagnostics as plain terminal text.
///
/// Output format, one diagnostic per block:
///
/// ```text
/// error[E101]: the target board does not have enough IO resources
///   --> LED: /LED1
///   note: try enabling alternate mapping
/// ```
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new() -> Self {
        Self
    }

    /// Renders a single diagnostic to a string.
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);
        if let Some(subject) = &diag.subject {
            let _ = writeln!(out, "  --> {subject}");
        }
        for note in &diag.notes {
            let _ = writeln!(out, "  note: {note}");
        }
        out
    }

    /// Renders a batch of diagnostics, in emission order.
    pub fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags.iter().map(|d| self.render(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{INSUFFICIENT_RESOURCES, PORT_NOT_PLACEABLE};

    #[test]
    fn renders_board_level_error() {
        let diag = Diagnostic::error(INSUFFICIENT_RESOURCES, "board is full");
        let text = TerminalRenderer::new().render(&diag);
        assert_eq!(text, "error[E101]: board is full\n");
    }

    #[test]
    fn renders_subject_and_notes() {
        let diag = Diagnostic::error(PORT_NOT_PLACEABLE, "cannot be placed")
            .with_subject("LED: /LED1")
            .with_note("no Led resources remain");
        let text = TerminalRenderer::new().render(&diag);
        assert!(text.contains("error[E102]: cannot be placed"));
        assert!(text.contains("  --> LED: /LED1"));
        assert!(text.contains("  note: no Led resources remain"));
    }

    #[test]
    fn renders_batch_in_order() {
        let diags = vec![
            Diagnostic::error(INSUFFICIENT_RESOURCES, "first"),
            Diagnostic::error(PORT_NOT_PLACEABLE, "second"),
        ];
        let text = TerminalRenderer::new().render_all(&diags);
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(first < second);
    }
}
