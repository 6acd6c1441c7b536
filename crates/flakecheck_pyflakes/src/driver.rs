//! The Python side of the backend and the report it prints.

use flakecheck_checker::{AnalyzerError, Finding, ParseError, SyntaxFailure};
use serde::Deserialize;

/// Python source run with `python -c`.
///
/// `argv[1]` is the file identifier; the encoded source arrives on stdin.
/// Exactly one JSON object is written to stdout.
pub const DRIVER_SCRIPT: &str = r#"
import ast
import json
import sys


def report(obj):
    json.dump(obj, sys.stdout)
    sys.stdout.flush()


def plain(arg):
    if isinstance(arg, bool) or not isinstance(arg, (int, str)):
        return str(arg)
    return arg


def main():
    filename = sys.argv[1] if len(sys.argv) > 1 else "<stdin>"
    source = sys.stdin.buffer.read()
    try:
        tree = compile(source, filename, "exec", ast.PyCF_ONLY_AST)
    except SyntaxError as err:
        report({
            "status": "syntax_error",
            "message": str(err.args[0]) if err.args else "invalid syntax",
            "line": err.lineno,
            "offset": err.offset,
            "text": err.text,
        })
        return
    except ValueError as err:
        report({
            "status": "syntax_error",
            "message": str(err),
            "line": None,
            "offset": None,
            "text": None,
        })
        return
    try:
        from pyflakes import checker
    except ImportError as err:
        report({"status": "unavailable", "reason": str(err)})
        return
    w = checker.Checker(tree, filename)
    report({
        "status": "ok",
        "findings": [
            {
                "kind": type(m).__name__,
                "template": m.message,
                "args": [plain(a) for a in m.message_args],
                "line": m.lineno,
            }
            for m in w.messages
        ],
    })


main()
"#;

/// The JSON report printed by [`DRIVER_SCRIPT`].
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// The source compiled and pyflakes ran.
    Ok {
        /// Findings in pyflakes' reporting order.
        findings: Vec<Finding>,
    },
    /// `compile()` raised.
    SyntaxError {
        /// The exception message.
        message: String,
        /// The line Python reported; 0 when the failure has no position.
        line: Option<i64>,
        /// The 1-indexed column offset; -1 when the failure has no position.
        offset: Option<i64>,
        /// The offending line; absent for decoding problems.
        text: Option<String>,
    },
    /// pyflakes could not be imported.
    Unavailable {
        /// The import error message.
        reason: String,
    },
}

impl Report {
    /// Decodes a report from the interpreter's stdout.
    pub fn from_stdout(stdout: &[u8]) -> Result<Self, AnalyzerError> {
        serde_json::from_slice(stdout).map_err(|e| {
            AnalyzerError::Backend(format!(
                "unreadable report ({e}): {}",
                String::from_utf8_lossy(stdout).trim()
            ))
        })
    }

    /// Turns the report into parse outcome terms.
    pub fn into_findings(self) -> Result<Vec<Finding>, ParseError> {
        match self {
            Report::Ok { findings } => Ok(findings),
            Report::SyntaxError {
                message,
                line,
                offset,
                text,
            } => Err(ParseError::Syntax(SyntaxFailure {
                message,
                line: line.and_then(positive).unwrap_or(1),
                offset: offset.and_then(positive),
                text,
            })),
            Report::Unavailable { reason } => Err(AnalyzerError::Unavailable(reason).into()),
        }
    }
}

/// Keeps a position only if it fits a 1-indexed `u32`.
fn positive(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|&n| n > 0)
}
