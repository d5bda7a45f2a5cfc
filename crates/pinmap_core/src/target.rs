//! Assignment targets, constant literals, and persistence records.
//!
//! A design port maps either onto a physical board resource or onto one of
//! four sentinel targets: constant zero, constant one (all-ones at the port
//! width), an arbitrary constant, or intentionally unconnected. Sentinels
//! are plain enum variants carried by value in each assignment record; they
//! are not drawn from the board catalog and can be reused without exhausting
//! inventory, but participate in type matching like any resource.

use pinmap_board::{BoardRectangle, IoResourceType};
use serde::{Deserialize, Serialize};

/// The target of one map-name assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapTarget {
    /// Constant zero at the port's width.
    Zero,
    /// Constant all-ones at the port's width.
    One,
    /// An arbitrary constant value supplied by the user.
    Constant(i64),
    /// Intentionally left unconnected.
    Unconnected,
    /// A physical resource on the board, identified by its rectangle.
    Board(BoardRectangle),
}

impl MapTarget {
    /// Whether this target is one of the four sentinels.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, MapTarget::Board(_))
    }

    /// The resource-type tag an assignment to this sentinel is recorded
    /// under. Board targets carry no intrinsic tag; the catalog classifies
    /// them.
    pub fn sentinel_type(&self) -> Option<IoResourceType> {
        match self {
            MapTarget::Zero | MapTarget::One | MapTarget::Constant(_) => {
                Some(IoResourceType::Constant)
            }
            MapTarget::Unconnected => Some(IoResourceType::Open),
            MapTarget::Board(_) => None,
        }
    }
}

/// A selectable mapping candidate presented to the editor for one port.
///
/// Unlike [`MapTarget`], the arbitrary-constant entry carries no value yet;
/// the value is obtained from a [`ConstantSource`] when the user commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectableTarget {
    /// Constant zero.
    Zero,
    /// Constant all-ones.
    One,
    /// An arbitrary constant, value to be entered on commit.
    ConstantValue,
    /// Leave the port unconnected.
    Unconnected,
    /// A physical resource on the board.
    Resource(BoardRectangle),
}

/// A literal recorded for a constant assignment: the value and the port
/// width it applies to. All-ones is stored as `-1` in two's-complement
/// sign-extension convention regardless of width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantValue {
    /// The literal value, sign-extended.
    pub value: i64,
    /// The port width in bits.
    pub width: u32,
}

impl ConstantValue {
    /// The literal truncated to the port width, as an unsigned pattern.
    pub fn unsigned(&self) -> u64 {
        if self.width >= 64 {
            self.value as u64
        } else {
            (self.value as u64) & ((1u64 << self.width) - 1)
        }
    }
}

/// Errors produced when parsing a user-entered constant literal.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LiteralError {
    /// The text is neither a decimal nor a `0x`-prefixed hexadecimal number.
    #[error("malformed constant literal '{0}'")]
    Malformed(String),
}

/// Parses a user-entered constant literal: decimal, or hexadecimal with a
/// `0x` prefix.
pub fn parse_constant_literal(text: &str) -> Result<i64, LiteralError> {
    let trimmed = text.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<i64>()
    };
    parsed.map_err(|_| LiteralError::Malformed(text.to_string()))
}

/// The external value-entry collaborator for arbitrary-constant assignments.
///
/// The engine polls [`request_literal`](Self::request_literal) until it gets
/// a well-formed literal or `None`; `None` cancels the assignment with no
/// state change. Malformed entries are bounced back through
/// [`reject_literal`](Self::reject_literal) before the next request, so an
/// interactive implementation can re-prompt.
pub trait ConstantSource {
    /// Asks for a constant literal for the named port. `None` cancels.
    fn request_literal(&self, port: &str) -> Option<String>;

    /// Notifies the collaborator that its last entry was malformed.
    fn reject_literal(&self, _text: &str) {}
}

/// A [`ConstantSource`] for headless operation: never supplies a value, so
/// arbitrary-constant assignments silently abort.
#[derive(Debug, Default)]
pub struct HeadlessConstantSource;

impl ConstantSource for HeadlessConstantSource {
    fn request_literal(&self, _port: &str) -> Option<String> {
        None
    }
}

/// The serializable per-port mapping record exchanged with project
/// persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapInfo {
    /// The port is intentionally unconnected.
    Unconnected,
    /// The port is tied to a constant value.
    Constant(i64),
    /// The port is mapped onto the resource at these coordinates.
    Rect(BoardRectangle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_classification() {
        assert!(MapTarget::Zero.is_sentinel());
        assert!(MapTarget::Unconnected.is_sentinel());
        assert!(!MapTarget::Board(BoardRectangle::new(0, 0, 1, 1)).is_sentinel());
        assert_eq!(
            MapTarget::Constant(7).sentinel_type(),
            Some(IoResourceType::Constant)
        );
        assert_eq!(
            MapTarget::Unconnected.sentinel_type(),
            Some(IoResourceType::Open)
        );
        assert_eq!(MapTarget::Board(BoardRectangle::new(0, 0, 1, 1)).sentinel_type(), None);
    }

    #[test]
    fn parse_decimal_and_hex() {
        assert_eq!(parse_constant_literal("255"), Ok(255));
        assert_eq!(parse_constant_literal("-1"), Ok(-1));
        assert_eq!(parse_constant_literal("0xFF"), Ok(255));
        assert_eq!(parse_constant_literal("0X10"), Ok(16));
        assert_eq!(parse_constant_literal("  42 "), Ok(42));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "zz", "0x", "0xG1", "12.5"] {
            assert!(matches!(
                parse_constant_literal(bad),
                Err(LiteralError::Malformed(_))
            ));
        }
    }

    #[test]
    fn all_ones_unsigned_view() {
        let ones = ConstantValue {
            value: -1,
            width: 4,
        };
        assert_eq!(ones.unsigned(), 0xF);
        let wide = ConstantValue {
            value: -1,
            width: 64,
        };
        assert_eq!(wide.unsigned(), u64::MAX);
    }

    #[test]
    fn headless_source_cancels() {
        assert_eq!(HeadlessConstantSource.request_literal("PIN: /P1"), None);
    }

    #[test]
    fn map_info_serde_roundtrip() {
        let infos = [
            MapInfo::Unconnected,
            MapInfo::Constant(-1),
            MapInfo::Rect(BoardRectangle::new(3, 4, 5, 6)),
        ];
        for info in infos {
            let json = serde_json::to_string(&info).unwrap();
            let restored: MapInfo = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, info);
        }
    }
}
