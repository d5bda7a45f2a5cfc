//! Physical board descriptions for the pinmap engine.
//!
//! A [`Board`] is a catalog of typed I/O resources: discrete pins, LEDs,
//! buttons, and multi-pin peripherals such as DIP switch banks and
//! bidirectional port headers. The mapping core consumes this catalog, it
//! never owns or edits it; board descriptions are produced by the (external)
//! board editor and arrive as plain serde data.
//!
//! The [`Inventory`] type is the disposable per-type availability snapshot
//! handed to the feasibility checker, so that exploratory checks never touch
//! the catalog itself.

#![warn(missing_docs)]

pub mod board;
pub mod component;
pub mod inventory;
pub mod rect;
pub mod types;

pub use board::Board;
pub use component::IoComponent;
pub use inventory::Inventory;
pub use rect::BoardRectangle;
pub use types::{BusDirection, IoResourceType, PinActivity};
