//! The normalized, user-facing record for one syntax error or finding.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A severity-tagged message attached to a source line.
///
/// Diagnostics are immutable once produced; sequences of them handed out by
/// the adapter are sorted ascending by `line`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The rendered message text.
    pub message: String,
    /// How the host should treat this diagnostic.
    pub severity: Severity,
    /// The 1-indexed source line.
    pub line: u32,
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity.
    pub fn new(severity: Severity, message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            severity,
            line,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>, line: u32) -> Self {
        Self::new(Severity::Error, message, line)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(message: impl Into<String>, line: u32) -> Self {
        Self::new(Severity::Warning, message, line)
    }
}
