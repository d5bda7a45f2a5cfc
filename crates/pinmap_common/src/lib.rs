//! Shared foundational types for the pinmap board-mapping engine.
//!
//! This crate provides the common result type used for internal-consistency
//! failures and the natural-order string comparison used when presenting
//! port name lists.

#![warn(missing_docs)]

pub mod natsort;
pub mod result;

pub use natsort::natural_cmp;
pub use result::{InternalError, PinmapResult};
