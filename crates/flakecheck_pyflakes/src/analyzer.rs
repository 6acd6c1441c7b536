//! Running the driver script in a Python subprocess.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use flakecheck_checker::{Analyzer, AnalyzerError, Finding, ParseError};

use crate::driver::{Report, DRIVER_SCRIPT};

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// A module that compiled; pyflakes has already looked at it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckedModule {
    /// Findings in the order pyflakes reported them.
    pub findings: Vec<Finding>,
}

/// Checks Python source with pyflakes in a child interpreter.
#[derive(Clone, Debug)]
pub struct PyflakesAnalyzer {
    python: OsString,
}

impl Default for PyflakesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PyflakesAnalyzer {
    /// Uses [`DEFAULT_PYTHON`] from `PATH`.
    pub fn new() -> Self {
        Self::with_interpreter(DEFAULT_PYTHON)
    }

    /// Uses the given interpreter, either a path or a name looked up on `PATH`.
    pub fn with_interpreter(python: impl Into<OsString>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// The configured interpreter.
    pub fn interpreter(&self) -> &OsStr {
        &self.python
    }

    fn run(&self, args: &[&OsStr], stdin: &[u8]) -> Result<Output, AnalyzerError> {
        let mut child = Command::new(&self.python)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AnalyzerError::Unavailable(format!(
                    "failed to start {}: {e}",
                    self.python.to_string_lossy()
                ))
            })?;

        if let Some(mut pipe) = child.stdin.take() {
            // A child that exits early closes its end; its exit status tells
            // the real story, so a broken pipe here is not an error.
            if let Err(e) = pipe.write_all(stdin) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(AnalyzerError::Backend(format!("writing source: {e}")));
                }
            }
        }

        child
            .wait_with_output()
            .map_err(|e| AnalyzerError::Backend(format!("waiting for interpreter: {e}")))
    }
}

fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let last = stderr.trim().lines().last().unwrap_or("").to_string();
    if last.is_empty() {
        format!("interpreter exited with {}", output.status)
    } else {
        last
    }
}

impl Analyzer for PyflakesAnalyzer {
    type Tree = CheckedModule;

    fn name(&self) -> &str {
        "pyflakes"
    }

    fn probe(&self) -> Result<(), AnalyzerError> {
        let output = self.run(&[OsStr::new("-c"), OsStr::new("import pyflakes")], &[])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AnalyzerError::Unavailable(stderr_tail(&output)))
        }
    }

    fn parse(&self, source: &[u8], identifier: &Path) -> Result<CheckedModule, ParseError> {
        let output = self.run(
            &[OsStr::new("-c"), OsStr::new(DRIVER_SCRIPT), identifier.as_os_str()],
            source,
        )?;
        if !output.status.success() {
            return Err(AnalyzerError::Backend(stderr_tail(&output)).into());
        }
        log::trace!(
            "{}: {} byte report",
            identifier.display(),
            output.stdout.len()
        );
        let findings = Report::from_stdout(&output.stdout)?.into_findings()?;
        Ok(CheckedModule { findings })
    }

    fn check(&self, tree: &CheckedModule, _identifier: &Path) -> Result<Vec<Finding>, AnalyzerError> {
        Ok(tree.findings.clone())
    }
}
