//! Turns one source unit into line-ordered, severity-tagged diagnostics.

use flakecheck_diagnostics::{AnalysisResult, Diagnostic};
use flakecheck_source::SourceUnit;

use crate::analyzer::{Analyzer, AnalyzerError, ParseError, SyntaxFailure};
use crate::finding::{classify, ClassificationError};
use crate::warning_log::{LogFacade, WarningLog};

/// Errors that escape [`DiagnosticsAdapter::analyze`].
///
/// Syntax errors and undecodable sources are not errors here: they are part
/// of a successful [`AnalysisResult`].
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The checker reported a kind the severity table does not know.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// The checker backend could not run or failed.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// Runs an [`Analyzer`] over source units and normalizes what it reports.
///
/// The adapter holds no per-call state, so one instance can serve any number
/// of sequential or concurrent calls.
pub struct DiagnosticsAdapter<A, L = LogFacade> {
    analyzer: A,
    log: L,
}

impl<A: Analyzer> DiagnosticsAdapter<A, LogFacade> {
    /// Creates an adapter that logs through the `log` facade.
    pub fn new(analyzer: A) -> Self {
        Self::with_log(analyzer, LogFacade)
    }
}

impl<A: Analyzer, L: WarningLog> DiagnosticsAdapter<A, L> {
    /// Creates an adapter with an explicit logging collaborator.
    pub fn with_log(analyzer: A, log: L) -> Self {
        Self { analyzer, log }
    }

    /// Returns the wrapped analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Analyzes one source unit.
    ///
    /// - Empty text or an unknown encoding returns an empty result without
    ///   touching the analyzer.
    /// - A syntax error returns one error diagnostic with `count == 1`.
    /// - A source that cannot be encoded or decoded logs one warning and
    ///   returns no diagnostics with `count == 1`.
    /// - Otherwise every finding becomes a diagnostic, stably sorted by line.
    pub fn analyze(&self, source: &SourceUnit) -> Result<AnalysisResult, AnalyzeError> {
        let Some(encoding) = source.encoding else {
            return Ok(AnalysisResult::empty());
        };
        if source.is_empty() {
            return Ok(AnalysisResult::empty());
        }

        let bytes = match encoding.encode(&source.text) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::debug!("{}: {err}", source.identifier.display());
                return Ok(self.decode_failure(source));
            }
        };

        let tree = match self.analyzer.parse(&bytes, &source.identifier) {
            Ok(tree) => tree,
            Err(ParseError::Syntax(failure)) => return Ok(self.syntax_failure(source, failure)),
            Err(ParseError::Backend(err)) => return Err(err.into()),
        };

        let mut findings = self.analyzer.check(&tree, &source.identifier)?;
        findings.sort_by_key(|finding| finding.line);

        let diagnostics = findings
            .iter()
            .map(|finding| -> Result<Diagnostic, ClassificationError> {
                let severity = classify(&finding.kind)?;
                Ok(Diagnostic::new(severity, finding.message(), finding.line))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnalysisResult::from_diagnostics(diagnostics))
    }

    fn syntax_failure(&self, source: &SourceUnit, failure: SyntaxFailure) -> AnalysisResult {
        // The parser's message is misleading when the text is missing: it
        // blames the declared encoding, so only the log line is kept.
        if failure.text.is_none() {
            log::debug!(
                "{}: {} (line {})",
                source.identifier.display(),
                failure.message,
                failure.line
            );
            return self.decode_failure(source);
        }
        AnalysisResult::syntax_error(failure.message, failure.line)
    }

    fn decode_failure(&self, source: &SourceUnit) -> AnalysisResult {
        self.log.warn(&format!(
            "{}: problem decoding source",
            source.identifier.display()
        ));
        AnalysisResult::decode_failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Finding;
    use flakecheck_diagnostics::Severity;
    use flakecheck_source::TextEncoding;
    use std::cell::{Cell, RefCell};
    use std::path::Path;

    /// Returns canned parse/check outcomes and counts calls.
    struct Canned {
        parse: Option<SyntaxFailure>,
        findings: Vec<Finding>,
        calls: Cell<usize>,
        seen_bytes: RefCell<Vec<u8>>,
    }

    impl Canned {
        fn findings(findings: Vec<Finding>) -> Self {
            Self {
                parse: None,
                findings,
                calls: Cell::new(0),
                seen_bytes: RefCell::new(Vec::new()),
            }
        }

        fn syntax(failure: SyntaxFailure) -> Self {
            Self {
                parse: Some(failure),
                ..Self::findings(Vec::new())
            }
        }
    }

    impl Analyzer for Canned {
        type Tree = ();

        fn name(&self) -> &str {
            "canned"
        }

        fn parse(&self, source: &[u8], _identifier: &Path) -> Result<(), ParseError> {
            self.calls.set(self.calls.get() + 1);
            *self.seen_bytes.borrow_mut() = source.to_vec();
            match &self.parse {
                Some(failure) => Err(failure.clone().into()),
                None => Ok(()),
            }
        }

        fn check(&self, _tree: &(), _identifier: &Path) -> Result<Vec<Finding>, AnalyzerError> {
            Ok(self.findings.clone())
        }
    }

    fn recording_adapter(
        analyzer: Canned,
    ) -> (
        DiagnosticsAdapter<Canned, impl Fn(&str)>,
        std::rc::Rc<RefCell<Vec<String>>>,
    ) {
        let logged = std::rc::Rc::new(RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&logged);
        let log = move |msg: &str| sink.borrow_mut().push(msg.to_string());
        (DiagnosticsAdapter::with_log(analyzer, log), logged)
    }

    #[test]
    fn unknown_encoding_short_circuits() {
        let (adapter, logged) = recording_adapter(Canned::findings(Vec::new()));
        let source = SourceUnit::new("import os\n", "a.py", None);
        let result = adapter.analyze(&source).unwrap();
        assert_eq!(result, AnalysisResult::empty());
        assert_eq!(adapter.analyzer().calls.get(), 0);
        assert!(logged.borrow().is_empty());
    }

    #[test]
    fn empty_text_short_circuits() {
        let (adapter, logged) = recording_adapter(Canned::findings(Vec::new()));
        let result = adapter.analyze(&SourceUnit::utf8("", "a.py")).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(adapter.analyzer().calls.get(), 0);
        assert!(logged.borrow().is_empty());
    }

    #[test]
    fn text_is_encoded_before_parsing() {
        let (adapter, _) = recording_adapter(Canned::findings(Vec::new()));
        let source = SourceUnit::new("s = 'é'", "a.py", Some(TextEncoding::Latin1));
        adapter.analyze(&source).unwrap();
        assert_eq!(
            *adapter.analyzer().seen_bytes.borrow(),
            vec![b's', b' ', b'=', b' ', b'\'', 0xE9, b'\'']
        );
    }

    #[test]
    fn unencodable_text_is_a_decode_failure() {
        let (adapter, logged) = recording_adapter(Canned::findings(Vec::new()));
        let source = SourceUnit::new("s = '€'", "a.py", Some(TextEncoding::Ascii));
        let result = adapter.analyze(&source).unwrap();
        assert_eq!(result, AnalysisResult::decode_failure());
        assert_eq!(adapter.analyzer().calls.get(), 0);
        assert_eq!(*logged.borrow(), vec!["a.py: problem decoding source"]);
    }

    #[test]
    fn syntax_error_with_text() {
        let failure = SyntaxFailure::new("invalid syntax", 2, "def f(:\n").with_offset(7);
        let (adapter, logged) = recording_adapter(Canned::syntax(failure));
        let result = adapter
            .analyze(&SourceUnit::utf8("x = 1\ndef f(:\n", "a.py"))
            .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::new(Severity::Error, "invalid syntax", 2)]
        );
        assert!(logged.borrow().is_empty());
    }

    #[test]
    fn syntax_error_without_text_is_logged_only() {
        let failure = SyntaxFailure::undecodable("unknown encoding: bogus", 0);
        let (adapter, logged) = recording_adapter(Canned::syntax(failure));
        let result = adapter
            .analyze(&SourceUnit::utf8("# -*- coding: bogus -*-\n", "pkg/a.py"))
            .unwrap();
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.count, 1);
        assert_eq!(*logged.borrow(), vec!["pkg/a.py: problem decoding source"]);
    }

    #[test]
    fn findings_sorted_stably_and_classified() {
        let (adapter, _) = recording_adapter(Canned::findings(vec![
            Finding::new("UndefinedName", "undefined name %r", vec!["foo".into()], 5),
            Finding::new("UnusedImport", "%r imported but unused", vec!["os".into()], 1),
            Finding::new("UnusedImport", "%r imported but unused", vec!["sys".into()], 5),
        ]));
        let result = adapter
            .analyze(&SourceUnit::utf8("import os\n", "a.py"))
            .unwrap();
        assert_eq!(result.count, 3);
        assert_eq!(
            result.diagnostics,
            vec![
                Diagnostic::warning("'os' imported but unused", 1),
                Diagnostic::error("undefined name 'foo'", 5),
                Diagnostic::warning("'sys' imported but unused", 5),
            ]
        );
    }

    #[test]
    fn unknown_kind_fails_whole_analysis() {
        let (adapter, _) = recording_adapter(Canned::findings(vec![
            Finding::new("UnusedImport", "%r imported but unused", vec!["os".into()], 1),
            Finding::new("IsLiteral", "use ==/!= to compare constant literals", vec![], 2),
        ]));
        let err = adapter
            .analyze(&SourceUnit::utf8("import os\n", "a.py"))
            .unwrap_err();
        match err {
            AnalyzeError::Classification(e) => assert_eq!(e.kind, "IsLiteral"),
            other => panic!("expected classification error, got {other:?}"),
        }
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        let (adapter, _) = recording_adapter(Canned::findings(Vec::new()));
        let result = adapter
            .analyze(&SourceUnit::utf8("print('hi')\n", "a.py"))
            .unwrap();
        assert_eq!(result, AnalysisResult::from_diagnostics(Vec::new()));
    }
}
