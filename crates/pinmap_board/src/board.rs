//! The board catalog: every physical resource a target board offers.

use crate::component::IoComponent;
use crate::inventory::Inventory;
use crate::rect::BoardRectangle;
use crate::types::IoResourceType;
use serde::{Deserialize, Serialize};

/// A target board: a named catalog of typed physical I/O resources.
///
/// The mapping core only reads this catalog. Queries are ordered: resources
/// come back in catalog order, which the feasibility checker relies on for
/// its deterministic consumption policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The board's name (also the leading segment of every map key).
    pub name: String,
    /// All I/O resources on this board, in catalog order.
    pub components: Vec<IoComponent>,
}

impl Board {
    /// Creates an empty board with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Returns the resources of `io_type` with at least `min_pins` live
    /// pins, in catalog order.
    pub fn components_of_type(
        &self,
        io_type: IoResourceType,
        min_pins: u32,
    ) -> Vec<&IoComponent> {
        self.components
            .iter()
            .filter(|c| c.io_type == io_type && c.pin_count >= min_pins)
            .collect()
    }

    /// Resolves a rectangle back to the resource it identifies.
    ///
    /// Sentinel targets (constants, unconnected) are not catalog resources
    /// and resolve to `None`.
    pub fn component_at(&self, rect: &BoardRectangle) -> Option<&IoComponent> {
        self.components.iter().find(|c| &c.rect == rect)
    }

    /// Classifies a rectangle back to its type tag, `Unknown` on a miss.
    pub fn type_at(&self, rect: &BoardRectangle) -> IoResourceType {
        self.component_at(rect)
            .map(|c| c.io_type)
            .unwrap_or(IoResourceType::Unknown)
    }

    /// Builds the disposable per-type availability snapshot used by the
    /// feasibility checker. Each entry is one resource's live pin count, in
    /// catalog order.
    pub fn inventory(&self) -> Inventory {
        let mut inv = Inventory::new();
        for c in &self.components {
            inv.add(c.io_type, c.pin_count);
        }
        inv
    }
}
