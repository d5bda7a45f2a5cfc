//! Diagnostic creation, accumulation, and rendering for the mapping engine.
//!
//! This crate provides structured [`Diagnostic`] messages with severity
//! levels and codes, accumulated in a thread-safe [`DiagnosticSink`] while
//! mapping operations run. Capacity failures (a board that cannot host the
//! design) are reported here; internal-consistency failures are logged and
//! never reach the sink.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode, INSUFFICIENT_RESOURCES, PORT_NOT_PLACEABLE};
pub use diagnostic::Diagnostic;
pub use renderer::TerminalRenderer;
pub use severity::Severity;
pub use sink::DiagnosticSink;
