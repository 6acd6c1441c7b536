//! The outcome of analyzing one source unit.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// The diagnostics produced for one source unit, plus a count.
///
/// `count` equals `diagnostics.len()` except after a syntax failure, where it
/// is always 1: a source that failed to decode reports `count == 1` with no
/// diagnostics at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Diagnostics sorted ascending by line.
    pub diagnostics: Vec<Diagnostic>,
    /// The number of problems found.
    pub count: usize,
}

impl AnalysisResult {
    /// An empty result, returned when there was nothing to analyze.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The result for a syntax error with a resolvable position.
    pub fn syntax_error(message: impl Into<String>, line: u32) -> Self {
        Self {
            diagnostics: vec![Diagnostic::error(message, line)],
            count: 1,
        }
    }

    /// The result for a source that could not be decoded.
    pub fn decode_failure() -> Self {
        Self {
            diagnostics: Vec::new(),
            count: 1,
        }
    }

    /// Wraps an already ordered diagnostic sequence.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let count = diagnostics.len();
        Self { diagnostics, count }
    }

    /// Returns the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    /// Returns the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    /// Returns `true` for the shape produced by [`decode_failure`](Self::decode_failure).
    ///
    /// No other constructor yields a nonzero count without diagnostics.
    pub fn is_decode_failure(&self) -> bool {
        self.diagnostics.is_empty() && self.count == 1
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}
