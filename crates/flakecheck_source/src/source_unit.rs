//! The per-call input bundle handed to the diagnostics adapter.

use crate::encoding::TextEncoding;
use std::io;
use std::path::{Path, PathBuf};

/// One file's content to be analyzed.
///
/// The adapter never owns a `SourceUnit`; hosts build one per check request.
/// `encoding` is `None` when the host has no declared (or a not understood)
/// encoding for the text, in which case the adapter skips analysis entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUnit {
    /// The full source text.
    pub text: String,
    /// The logical file identifier used in diagnostics (usually a path).
    pub identifier: PathBuf,
    /// The declared encoding of the text, if known.
    pub encoding: Option<TextEncoding>,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<usize>,
}

impl SourceUnit {
    /// Creates a source unit with an explicit (possibly unknown) encoding.
    pub fn new(
        text: impl Into<String>,
        identifier: impl Into<PathBuf>,
        encoding: Option<TextEncoding>,
    ) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            text,
            identifier: identifier.into(),
            encoding,
            line_starts,
        }
    }

    /// Creates a UTF-8 source unit.
    pub fn utf8(text: impl Into<String>, identifier: impl Into<PathBuf>) -> Self {
        Self::new(text, identifier, Some(TextEncoding::Utf8))
    }

    /// Creates a source unit whose encoding is given as a label.
    ///
    /// An unrecognized label leaves the encoding unset.
    pub fn with_label(
        text: impl Into<String>,
        identifier: impl Into<PathBuf>,
        label: &str,
    ) -> Self {
        Self::new(text, identifier, TextEncoding::from_label(label))
    }

    /// Reads and decodes a file from disk.
    ///
    /// Bytes that are invalid in `encoding` are reported as
    /// [`io::ErrorKind::InvalidData`].
    pub fn load(path: &Path, encoding: TextEncoding) -> Result<Self, io::Error> {
        let bytes = std::fs::read(path)?;
        let text = encoding
            .decode(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::new(text, path, Some(encoding)))
    }

    /// Returns `true` if there is nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines in the text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of a 1-indexed line without its line terminator.
    ///
    /// Returns `None` for line 0, lines past the end of the text, or when
    /// `text` was replaced after construction and the line no longer maps to
    /// a character boundary.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |next| next - 1);
        let line = self.text.get(start..end)?;
        Some(line.trim_end_matches('\r'))
    }
}

/// Computes the byte offsets of each line start in the given text.
fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}
