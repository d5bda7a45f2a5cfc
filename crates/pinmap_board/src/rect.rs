//! Board-area rectangles identifying physical resources.

use serde::{Deserialize, Serialize};

/// The on-board rectangle occupied by a physical I/O resource.
///
/// Rectangles are the identity of a resource in the catalog: two resources
/// never share one, and equality is structural, so an assignment can be
/// persisted as plain coordinates and resolved again after reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardRectangle {
    /// Left edge, in board image pixels.
    pub x: i32,
    /// Top edge, in board image pixels.
    pub y: i32,
    /// Width, in board image pixels.
    pub width: u32,
    /// Height, in board image pixels.
    pub height: u32,
}

impl BoardRectangle {
    /// Creates a rectangle from its position and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        let a = BoardRectangle::new(10, 20, 30, 15);
        let b = BoardRectangle::new(10, 20, 30, 15);
        let c = BoardRectangle::new(11, 20, 30, 15);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serde_roundtrip() {
        let rect = BoardRectangle::new(-5, 0, 12, 8);
        let json = serde_json::to_string(&rect).unwrap();
        let restored: BoardRectangle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, rect);
    }
}
