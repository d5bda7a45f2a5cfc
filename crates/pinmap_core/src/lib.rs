//! The board I/O resource-mapping engine.
//!
//! This crate decides whether a target board can host a design's top-level
//! ports, maintains the explicit partial assignment from design ports to
//! physical board resources while the design is edited, and derives the
//! sequential top-level bus indices that code generation consumes.
//!
//! # Pipeline
//!
//! 1. **Extract** — a [`PortExtractor`] produces the [`PortRegistry`] of
//!    mappable design ports for the active board
//! 2. **Check** — [`MappableResources::is_mappable`] simulates allocation
//!    against a disposable [`Inventory`](pinmap_board::Inventory) snapshot
//! 3. **Map** — [`MappableResources::assign`] / `unassign` maintain the
//!    partial assignment; [`MappableResources::rebuild_mapped_index`]
//!    reconciles it against every design edit
//! 4. **Allocate** — [`MappableResources::build_io_mapping_information`]
//!    assigns each mapped port its position in the top-level FPGA buses
//!
//! # Usage
//!
//! ```ignore
//! use pinmap_core::MappableResources;
//!
//! let mut resources = MappableResources::new(board, Box::new(extractor));
//! let mut inventory = resources.board().inventory();
//! let ok = resources.is_mappable(&mut inventory, &sink);
//! ```

#![warn(missing_docs)]

pub mod container;
pub mod key;
pub mod pin_ids;
pub mod port;
pub mod registry;
pub mod store;
pub mod target;

pub use container::MappableResources;
pub use key::{HierKey, KeyParseError, MapKey};
pub use pin_ids::PinIdTables;
pub use port::{Assignment, MapFamily, MappablePort, PortDirection, PortKind};
pub use registry::{PortExtractor, PortRegistry};
pub use store::MappingStore;
pub use target::{
    parse_constant_literal, ConstantSource, ConstantValue, HeadlessConstantSource, LiteralError,
    MapInfo, MapTarget, SelectableTarget,
};
