//! The host role: availability check, then clear-and-display on every check.

use flakecheck_diagnostics::{AnalysisResult, MessagePanel};
use flakecheck_source::SourceUnit;

use crate::adapter::{AnalyzeError, DiagnosticsAdapter};
use crate::analyzer::Analyzer;
use crate::warning_log::{LogFacade, WarningLog};

/// A checker mode driving a [`DiagnosticsAdapter`] for one message panel.
///
/// The mode probes its analyzer once when installed. If the analyzer cannot
/// run, the mode stays disabled and every later check is a no-op.
pub struct CheckerMode<A, L = LogFacade> {
    adapter: DiagnosticsAdapter<A, L>,
    enabled: bool,
}

impl<A: Analyzer, L: WarningLog> CheckerMode<A, L> {
    /// Human-readable description of the mode.
    pub const DESCRIPTION: &'static str = "Check python code using pyFlakes";

    /// Stable identifier of the mode.
    pub const IDENTIFIER: &'static str = "pyFlakesCheckerMode";

    /// Installs the mode, enabling it only if the analyzer is available.
    pub fn install(adapter: DiagnosticsAdapter<A, L>) -> Self {
        let name = adapter.analyzer().name().to_string();
        let enabled = match adapter.analyzer().probe() {
            Ok(()) => {
                log::debug!("{name} found");
                true
            }
            Err(err) => {
                log::warn!("cannot run {name} ({err}), {} disabled", Self::IDENTIFIER);
                false
            }
        };
        Self { adapter, enabled }
    }

    /// Returns `true` if checks will run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the wrapped adapter.
    pub fn adapter(&self) -> &DiagnosticsAdapter<A, L> {
        &self.adapter
    }

    /// Checks `source` and replaces the panel's messages with the result.
    ///
    /// Returns `Ok(None)` without touching the panel when the mode is
    /// disabled. When analysis fails, or the source could not be decoded,
    /// the panel is left as it was.
    pub fn run<P>(
        &self,
        source: &SourceUnit,
        panel: &P,
    ) -> Result<Option<AnalysisResult>, AnalyzeError>
    where
        P: MessagePanel + ?Sized,
    {
        if !self.enabled {
            return Ok(None);
        }
        let result = self.adapter.analyze(source)?;
        if result.is_decode_failure() {
            return Ok(Some(result));
        }
        panel.clear_messages();
        panel.add_messages(&result.diagnostics);
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerError, ParseError};
    use crate::finding::Finding;
    use flakecheck_diagnostics::{Diagnostic, DiagnosticSink};
    use flakecheck_source::TextEncoding;
    use std::path::Path;

    struct Scripted {
        available: bool,
        findings: Vec<Finding>,
    }

    impl Analyzer for Scripted {
        type Tree = ();

        fn name(&self) -> &str {
            "scripted"
        }

        fn probe(&self) -> Result<(), AnalyzerError> {
            if self.available {
                Ok(())
            } else {
                Err(AnalyzerError::Unavailable("not installed".to_string()))
            }
        }

        fn parse(&self, _source: &[u8], _identifier: &Path) -> Result<(), ParseError> {
            Ok(())
        }

        fn check(&self, _tree: &(), _identifier: &Path) -> Result<Vec<Finding>, AnalyzerError> {
            Ok(self.findings.clone())
        }
    }

    fn mode(available: bool, findings: Vec<Finding>) -> CheckerMode<Scripted> {
        CheckerMode::install(DiagnosticsAdapter::new(Scripted {
            available,
            findings,
        }))
    }

    #[test]
    fn unavailable_analyzer_disables_mode() {
        let mode = mode(false, Vec::new());
        assert!(!mode.is_enabled());

        let panel = DiagnosticSink::new();
        panel.emit(Diagnostic::warning("stale", 1));
        let out = mode
            .run(&SourceUnit::utf8("import os\n", "a.py"), &panel)
            .unwrap();
        assert!(out.is_none());
        assert_eq!(panel.diagnostics(), vec![Diagnostic::warning("stale", 1)]);
    }

    #[test]
    fn run_replaces_panel_contents() {
        let mode = mode(
            true,
            vec![Finding::new(
                "UndefinedName",
                "undefined name %r",
                vec!["foo".into()],
                2,
            )],
        );
        assert!(mode.is_enabled());

        let panel = DiagnosticSink::new();
        panel.emit(Diagnostic::warning("stale", 9));
        let result = mode
            .run(&SourceUnit::utf8("x = 1\nfoo\n", "a.py"), &panel)
            .unwrap()
            .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(
            panel.diagnostics(),
            vec![Diagnostic::error("undefined name 'foo'", 2)]
        );
        assert!(panel.has_errors());
    }

    #[test]
    fn failed_analysis_keeps_panel() {
        let mode = mode(
            true,
            vec![Finding::new("NotAKind", "whatever", Vec::new(), 1)],
        );
        let panel = DiagnosticSink::new();
        panel.emit(Diagnostic::warning("previous", 1));
        assert!(mode
            .run(&SourceUnit::utf8("x = 1\n", "a.py"), &panel)
            .is_err());
        assert_eq!(panel.diagnostics().len(), 1);
    }

    #[test]
    fn undecodable_source_keeps_panel() {
        let mode = mode(
            true,
            vec![Finding::new("UnusedImport", "%r imported but unused", vec!["os".into()], 1)],
        );
        let panel = DiagnosticSink::new();
        panel.emit(Diagnostic::error("undefined name 'foo'", 4));

        let source = SourceUnit::new("s = '\u{20ac}'\n", "a.py", Some(TextEncoding::Ascii));
        let result = mode.run(&source, &panel).unwrap().unwrap();
        assert_eq!(result.count, 1);
        assert!(result.diagnostics.is_empty());
        assert_eq!(
            panel.diagnostics(),
            vec![Diagnostic::error("undefined name 'foo'", 4)]
        );
        assert!(panel.has_errors());
    }

    #[test]
    fn constants() {
        assert_eq!(
            CheckerMode::<Scripted>::IDENTIFIER,
            "pyFlakesCheckerMode"
        );
        assert_eq!(
            CheckerMode::<Scripted>::DESCRIPTION,
            "Check python code using pyFlakes"
        );
    }
}
