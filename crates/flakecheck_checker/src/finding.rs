//! Checker findings and the fixed finding-kind to severity table.

use flakecheck_diagnostics::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::template::render_template;

/// One argument substituted into a finding's message template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingArg {
    /// An integer, usually a line number.
    Int(i64),
    /// A string, usually an identifier or module name.
    Str(String),
}

impl From<&str> for FindingArg {
    fn from(value: &str) -> Self {
        FindingArg::Str(value.to_string())
    }
}

impl From<String> for FindingArg {
    fn from(value: String) -> Self {
        FindingArg::Str(value)
    }
}

impl From<i64> for FindingArg {
    fn from(value: i64) -> Self {
        FindingArg::Int(value)
    }
}

/// A single issue reported by the external checker.
///
/// `kind` is the checker's own tag for the message class (for pyflakes, the
/// message class name). It is kept as a string so that a checker newer than
/// the severity table surfaces as a [`ClassificationError`] instead of
/// failing to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The finding kind tag, e.g. `"UnusedImport"`.
    pub kind: String,
    /// A Python `%`-style message template.
    pub template: String,
    /// Arguments substituted into `template`.
    #[serde(default)]
    pub args: Vec<FindingArg>,
    /// The 1-indexed source line.
    pub line: u32,
}

impl Finding {
    /// Creates a finding.
    pub fn new(
        kind: impl Into<String>,
        template: impl Into<String>,
        args: Vec<FindingArg>,
        line: u32,
    ) -> Self {
        Self {
            kind: kind.into(),
            template: template.into(),
            args,
            line,
        }
    }

    /// Renders the final message text.
    pub fn message(&self) -> String {
        render_template(&self.template, &self.args)
    }
}

/// The finding kinds pyflakes reports, each with a fixed severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FindingKind {
    /// An imported name is never used.
    UnusedImport,
    /// A name is rebound before its previous binding was used.
    RedefinedWhileUnused,
    /// A list comprehension variable rebinds an outer name.
    RedefinedInListComp,
    /// A loop variable shadows an import.
    ImportShadowedByLoopVar,
    /// `from module import *` is used.
    ImportStarUsed,
    /// A name is used but never bound.
    UndefinedName,
    /// A doctest example contains a syntax error.
    DoctestSyntaxError,
    /// `__all__` lists a name that is not defined.
    UndefinedExport,
    /// A local name is referenced before assignment.
    UndefinedLocal,
    /// A function declares the same argument twice.
    DuplicateArgument,
    /// A name is redefined.
    Redefined,
    /// A `from __future__` import comes after other statements.
    LateFutureImport,
    /// A local variable is assigned but never used.
    UnusedVariable,
}

impl FindingKind {
    /// Every kind in the severity table.
    pub const ALL: [FindingKind; 13] = [
        FindingKind::UnusedImport,
        FindingKind::RedefinedWhileUnused,
        FindingKind::RedefinedInListComp,
        FindingKind::ImportShadowedByLoopVar,
        FindingKind::ImportStarUsed,
        FindingKind::UndefinedName,
        FindingKind::DoctestSyntaxError,
        FindingKind::UndefinedExport,
        FindingKind::UndefinedLocal,
        FindingKind::DuplicateArgument,
        FindingKind::Redefined,
        FindingKind::LateFutureImport,
        FindingKind::UnusedVariable,
    ];

    /// Returns the checker's tag for this kind.
    pub fn name(self) -> &'static str {
        match self {
            FindingKind::UnusedImport => "UnusedImport",
            FindingKind::RedefinedWhileUnused => "RedefinedWhileUnused",
            FindingKind::RedefinedInListComp => "RedefinedInListComp",
            FindingKind::ImportShadowedByLoopVar => "ImportShadowedByLoopVar",
            FindingKind::ImportStarUsed => "ImportStarUsed",
            FindingKind::UndefinedName => "UndefinedName",
            FindingKind::DoctestSyntaxError => "DoctestSyntaxError",
            FindingKind::UndefinedExport => "UndefinedExport",
            FindingKind::UndefinedLocal => "UndefinedLocal",
            FindingKind::DuplicateArgument => "DuplicateArgument",
            FindingKind::Redefined => "Redefined",
            FindingKind::LateFutureImport => "LateFutureImport",
            FindingKind::UnusedVariable => "UnusedVariable",
        }
    }

    /// Looks up a kind by the checker's tag.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the severity diagnostics of this kind are reported with.
    pub fn severity(self) -> Severity {
        match self {
            FindingKind::UnusedImport
            | FindingKind::RedefinedWhileUnused
            | FindingKind::RedefinedInListComp
            | FindingKind::ImportShadowedByLoopVar
            | FindingKind::ImportStarUsed
            | FindingKind::DuplicateArgument
            | FindingKind::Redefined
            | FindingKind::LateFutureImport
            | FindingKind::UnusedVariable => Severity::Warning,
            FindingKind::UndefinedName
            | FindingKind::DoctestSyntaxError
            | FindingKind::UndefinedExport
            | FindingKind::UndefinedLocal => Severity::Error,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The checker reported a finding kind the severity table does not know.
///
/// This means the table is out of date for the checker version in use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no severity is defined for finding kind '{kind}'")]
pub struct ClassificationError {
    /// The unknown kind tag.
    pub kind: String,
}

/// Classifies a finding kind tag.
pub fn classify(kind: &str) -> Result<Severity, ClassificationError> {
    FindingKind::from_name(kind)
        .map(FindingKind::severity)
        .ok_or_else(|| ClassificationError {
            kind: kind.to_string(),
        })
}
