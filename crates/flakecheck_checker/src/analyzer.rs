//! The external checker seen from the adapter: parse, then check.

use std::path::Path;

use crate::finding::Finding;

/// A syntax error reported by the parser.
///
/// `text` is the offending source line. The parser leaves it unset when the
/// failure comes from decoding the bytes rather than from the grammar, and
/// the adapter treats such failures as undecodable sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxFailure {
    /// The parser's message, e.g. `"invalid syntax"`.
    pub message: String,
    /// The 1-indexed line of the error.
    pub line: u32,
    /// The 1-indexed column offset, when known.
    pub offset: Option<u32>,
    /// The offending line of text, when known.
    pub text: Option<String>,
}

impl SyntaxFailure {
    /// Creates a syntax failure that points at a line of text.
    pub fn new(message: impl Into<String>, line: u32, text: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
            offset: None,
            text: Some(text.into()),
        }
    }

    /// Creates a failure with no offending text (an undecodable source).
    pub fn undecodable(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
            offset: None,
            text: None,
        }
    }

    /// Sets the column offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// The checker backend itself failed.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The checker cannot run here at all (missing interpreter or library).
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),

    /// The checker ran but misbehaved (crash, unreadable output).
    #[error("analyzer failed: {0}")]
    Backend(String),
}

/// Why [`Analyzer::parse`] produced no tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source is not valid Python.
    #[error("syntax error at line {}: {}", .0.line, .0.message)]
    Syntax(SyntaxFailure),

    /// The backend could not parse at all.
    #[error(transparent)]
    Backend(#[from] AnalyzerError),
}

impl From<SyntaxFailure> for ParseError {
    fn from(failure: SyntaxFailure) -> Self {
        ParseError::Syntax(failure)
    }
}

/// A Python checker: a parser plus a static analyzer over its trees.
///
/// The severity table in [`FindingKind`](crate::FindingKind) is tied to the
/// pyflakes finding vocabulary, so implementations are expected to report
/// pyflakes kind tags.
pub trait Analyzer {
    /// The parsed representation handed from `parse` to `check`.
    type Tree;

    /// Returns a short name for log messages (e.g. "pyflakes").
    fn name(&self) -> &str;

    /// Checks whether the backend can run at all.
    ///
    /// Hosts call this once before putting the analyzer into service.
    fn probe(&self) -> Result<(), AnalyzerError> {
        Ok(())
    }

    /// Parses encoded source bytes, tagging errors with `identifier`.
    fn parse(&self, source: &[u8], identifier: &Path) -> Result<Self::Tree, ParseError>;

    /// Runs the static checks over a parsed tree.
    ///
    /// Findings may come back in any order.
    fn check(&self, tree: &Self::Tree, identifier: &Path) -> Result<Vec<Finding>, AnalyzerError>;
}
