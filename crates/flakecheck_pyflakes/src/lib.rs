//! A pyflakes-backed [`Analyzer`](flakecheck_checker::Analyzer).
//!
//! [`PyflakesAnalyzer`] runs a Python interpreter with a small driver script:
//! the source bytes go in on stdin, the interpreter compiles them to an AST
//! and runs `pyflakes.checker.Checker` over it, and a JSON report comes back
//! on stdout. Parsing and checking share that single round trip, so the tree
//! handle returned by `parse` already carries the findings.

#![warn(missing_docs)]

mod analyzer;
mod driver;

pub use analyzer::{CheckedModule, PyflakesAnalyzer, DEFAULT_PYTHON};
pub use driver::{Report, DRIVER_SCRIPT};
