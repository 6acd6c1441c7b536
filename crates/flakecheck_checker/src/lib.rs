//! The diagnostics adapter between a Python checker and a message display.
//!
//! [`DiagnosticsAdapter::analyze`] encodes a [`SourceUnit`](flakecheck_source::SourceUnit),
//! asks an [`Analyzer`] to parse and check it, classifies every finding with
//! the fixed [`FindingKind`] severity table, and returns line-ordered
//! diagnostics. [`CheckerMode`] plays the host role on top of it: it probes the
//! analyzer once, and clears and refills a message panel on every check.
//!
//! # Error policy
//!
//! - Syntax errors become a single error diagnostic.
//! - Sources that cannot be decoded are logged through a [`WarningLog`] and
//!   produce no diagnostic.
//! - A finding kind missing from the severity table is a hard
//!   [`ClassificationError`].

#![warn(missing_docs)]

mod adapter;
mod analyzer;
mod finding;
mod mode;
mod template;
mod warning_log;

pub use adapter::{AnalyzeError, DiagnosticsAdapter};
pub use analyzer::{Analyzer, AnalyzerError, ParseError, SyntaxFailure};
pub use finding::{classify, ClassificationError, Finding, FindingArg, FindingKind};
pub use mode::CheckerMode;
pub use template::{python_repr, render_template};
pub use warning_log::{LogFacade, WarningLog};
