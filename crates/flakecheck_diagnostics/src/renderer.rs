//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;
use crate::result::AnalysisResult;
use crate::severity::Severity;
use flakecheck_source::SourceUnit;
use serde_json::{json, Value};

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source: &SourceUnit) -> String;

    /// Renders every diagnostic of a result, in order.
    fn render_result(&self, result: &AnalysisResult, source: &SourceUnit) -> String {
        result
            .diagnostics
            .iter()
            .map(|diag| self.render(diag, source))
            .collect()
    }
}

const RED_BOLD: &str = "\x1b[1;31m";
const YELLOW_BOLD: &str = "\x1b[1;33m";
const BLUE_BOLD: &str = "\x1b[1;34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error: undefined name 'foo'
///   --> pkg/mod.py:10
///    |
/// 10 | print(foo)
///    |
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source: &SourceUnit) -> String {
        let mut out = String::new();

        let style = match diag.severity {
            Severity::Error => RED_BOLD,
            Severity::Warning => YELLOW_BOLD,
        };
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(style, &diag.severity.to_string()),
            self.paint(BOLD, &diag.message)
        ));

        let line_num = diag.line.to_string();
        let padding = " ".repeat(line_num.len());
        out.push_str(&format!(
            "{padding}{} {}:{}\n",
            self.paint(BLUE_BOLD, "-->"),
            source.identifier.display(),
            diag.line
        ));

        if let Some(content) = source.line_text(diag.line) {
            let gutter = self.paint(BLUE_BOLD, "|");
            out.push_str(&format!("{padding} {gutter}\n"));
            out.push_str(&format!(
                "{} {gutter} {content}\n",
                self.paint(BLUE_BOLD, &line_num)
            ));
            out.push_str(&format!("{padding} {gutter}\n"));
        }

        out
    }
}

/// Renders diagnostics as JSON objects.
///
/// A single diagnostic becomes one compact object per line; a whole result
/// becomes a pretty-printed object with `path`, `count` and `diagnostics`.
#[derive(Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Creates a new JSON renderer.
    pub fn new() -> Self {
        Self
    }

    /// Builds the JSON value for a whole analysis result.
    pub fn to_value(&self, result: &AnalysisResult, source: &SourceUnit) -> Value {
        json!({
            "path": source.identifier.display().to_string(),
            "count": result.count,
            "diagnostics": result.diagnostics,
        })
    }
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, source: &SourceUnit) -> String {
        let value = json!({
            "path": source.identifier.display().to_string(),
            "line": diag.line,
            "severity": diag.severity,
            "message": diag.message,
        });
        format!("{value}\n")
    }

    fn render_result(&self, result: &AnalysisResult, source: &SourceUnit) -> String {
        format!("{:#}\n", self.to_value(result, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SourceUnit {
        SourceUnit::utf8("import os\n\nprint(foo)\n", "pkg/mod.py")
    }

    #[test]
    fn render_error_with_source_line() {
        let diag = Diagnostic::error("undefined name 'foo'", 3);
        let output = TerminalRenderer::new(false).render(&diag, &source());

        assert!(output.starts_with("error: undefined name 'foo'\n"));
        assert!(output.contains(" --> pkg/mod.py:3\n"));
        assert!(output.contains("3 | print(foo)\n"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn render_warning_header() {
        let diag = Diagnostic::warning("'os' imported but unused", 1);
        let output = TerminalRenderer::new(false).render(&diag, &source());
        assert!(output.starts_with("warning: 'os' imported but unused\n"));
        assert!(output.contains("1 | import os\n"));
    }

    #[test]
    fn render_line_past_end_has_no_snippet() {
        let diag = Diagnostic::error("unexpected EOF while parsing", 40);
        let output = TerminalRenderer::new(false).render(&diag, &source());
        assert!(output.contains("--> pkg/mod.py:40"));
        assert!(!output.contains(" | "));
    }

    #[test]
    fn color_wraps_severity() {
        let diag = Diagnostic::error("invalid syntax", 1);
        let output = TerminalRenderer::new(true).render(&diag, &source());
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m"));
    }

    #[test]
    fn render_result_concatenates_in_order() {
        let result = AnalysisResult::from_diagnostics(vec![
            Diagnostic::warning("'os' imported but unused", 1),
            Diagnostic::error("undefined name 'foo'", 3),
        ]);
        let output = TerminalRenderer::new(false).render_result(&result, &source());
        let warn_at = output.find("warning:").unwrap();
        let err_at = output.find("error:").unwrap();
        assert!(warn_at < err_at);
    }

    #[test]
    fn json_single_diagnostic() {
        let diag = Diagnostic::warning("'os' imported but unused", 1);
        let output = JsonRenderer::new().render(&diag, &source());
        let value: Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["path"], "pkg/mod.py");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["line"], 1);
    }

    #[test]
    fn json_result_keeps_count() {
        let result = AnalysisResult::decode_failure();
        let value = JsonRenderer::new().to_value(&result, &source());
        assert_eq!(value["count"], 1);
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 0);
    }
}
