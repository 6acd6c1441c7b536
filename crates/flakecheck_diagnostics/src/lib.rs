//! Diagnostic records, severity classification results, and rendering.
//!
//! This crate provides the normalized [`Diagnostic`] produced for every syntax
//! error or checker finding, the per-file [`AnalysisResult`], the thread-safe
//! [`DiagnosticSink`] that doubles as a host [`MessagePanel`], and
//! [`DiagnosticRenderer`] implementations for terminal and JSON output.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod renderer;
pub mod result;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use result::AnalysisResult;
pub use severity::Severity;
pub use sink::{DiagnosticSink, MessagePanel};
