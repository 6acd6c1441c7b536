//! Configuration types deserialized from `flakecheck.toml`.

use flakecheck_source::TextEncoding;
use serde::Deserialize;

/// The top-level configuration parsed from `flakecheck.toml`.
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct CheckConfig {
    /// Source handling settings (encoding, excluded directories).
    #[serde(default)]
    pub check: CheckSettings,
    /// How the pyflakes backend is run.
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
    /// How results are printed.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Settings for reading and discovering source files.
#[derive(Debug, Deserialize)]
pub struct CheckSettings {
    /// Encoding label applied to files that are read from disk.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Directory names skipped during recursive discovery.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl CheckSettings {
    /// Resolves the configured encoding label.
    pub fn text_encoding(&self) -> Option<TextEncoding> {
        TextEncoding::from_label(&self.encoding)
    }
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            exclude: default_exclude(),
        }
    }
}

/// Settings for the Python interpreter that runs pyflakes.
#[derive(Debug, Deserialize)]
pub struct AnalyzerSettings {
    /// Interpreter executable name or path.
    #[serde(default = "default_python")]
    pub python: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            python: default_python(),
        }
    }
}

/// Output preferences.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSettings {
    /// The report format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Report format for diagnostics.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_exclude() -> Vec<String> {
    [".git", ".hg", "__pycache__", ".tox", ".venv", "venv"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_python() -> String {
    "python3".to_string()
}
