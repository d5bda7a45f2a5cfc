//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric
/// identifier, displayed as e.g. `E101` or `W203`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// The board lacks the I/O resources to host the whole design.
pub const INSUFFICIENT_RESOURCES: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 101,
};

/// One specific design port cannot be placed on any compatible resource.
pub const PORT_NOT_PLACEABLE: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 102,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Error.prefix(), 'E');
        assert_eq!(Category::Warning.prefix(), 'W');
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{INSUFFICIENT_RESOURCES}"), "E101");
        assert_eq!(format!("{}", DiagnosticCode::new(Category::Warning, 3)), "W003");
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&PORT_NOT_PLACEABLE).unwrap();
        let restored: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, PORT_NOT_PLACEABLE);
    }
}
