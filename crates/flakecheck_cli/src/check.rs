//! `flakecheck check` — the analysis pipeline.
//!
//! 1. Load config via `flakecheck_config`
//! 2. Discover `.py` files under the given paths
//! 3. Install the pyflakes checker mode (probes the interpreter once)
//! 4. Read and analyze every file in parallel
//! 5. Render diagnostics in path order

use std::path::{Path, PathBuf};

use flakecheck_checker::{CheckerMode, DiagnosticsAdapter};
use flakecheck_config::OutputFormat;
use flakecheck_diagnostics::{
    AnalysisResult, DiagnosticRenderer, DiagnosticSink, JsonRenderer, TerminalRenderer,
};
use flakecheck_pyflakes::PyflakesAnalyzer;
use flakecheck_source::{SourceUnit, TextEncoding};
use rayon::prelude::*;

use crate::pipeline::{discover_python_files, resolve_config};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Exit code when the analyzer cannot run at all.
const EXIT_UNAVAILABLE: i32 = 2;

/// What happened to one discovered file.
#[derive(Debug)]
enum FileOutcome {
    /// The file was analyzed.
    Checked {
        source: SourceUnit,
        result: AnalysisResult,
    },
    /// The bytes on disk are not valid in the configured encoding.
    Undecodable(PathBuf),
    /// The file could not be read or the analysis itself failed.
    Failed { path: PathBuf, error: String },
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Totals {
    errors: usize,
    warnings: usize,
    files: usize,
    failures: usize,
}

/// Runs the `flakecheck check` command.
///
/// Returns exit code 0 if no errors, 1 if there are errors, 2 if pyflakes
/// cannot be run.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;

    let label = args.encoding.as_deref().unwrap_or(&config.check.encoding);
    let encoding =
        TextEncoding::from_label(label).ok_or_else(|| format!("unknown encoding '{label}'"))?;
    let python = args.python.as_deref().unwrap_or(&config.analyzer.python);
    let format = args.format.unwrap_or(match config.output.format {
        OutputFormat::Text => ReportFormat::Text,
        OutputFormat::Json => ReportFormat::Json,
    });

    let roots: Vec<PathBuf> = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.iter().map(PathBuf::from).collect()
    };
    let files = discover_python_files(&roots, &config.check.exclude)?;

    if files.is_empty() {
        if !global.quiet {
            eprintln!("warning: no Python files found");
        }
        return Ok(0);
    }

    let mode = CheckerMode::install(DiagnosticsAdapter::new(PyflakesAnalyzer::with_interpreter(
        python,
    )));
    if !mode.is_enabled() {
        eprintln!("error: cannot run pyflakes with '{python}'");
        return Ok(EXIT_UNAVAILABLE);
    }

    if global.verbose {
        eprintln!(
            "   Checking {} file(s) as {encoding} with {python}",
            files.len()
        );
    }

    // `par_iter().map().collect()` keeps the discovery order.
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| check_file(&mode, path, encoding))
        .collect();

    match format {
        ReportFormat::Text => eprint!("{}", render_text(&outcomes, global.color)),
        ReportFormat::Json => {
            println!("{}", render_json(&outcomes));
            eprint!("{}", render_failures(&outcomes));
        }
    }

    let totals = summarize(&outcomes);
    if !global.quiet && format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s) in {} file(s)",
            totals.errors, totals.warnings, totals.files
        );
    }

    if totals.errors > 0 || totals.failures > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn check_file(
    mode: &CheckerMode<PyflakesAnalyzer>,
    path: &Path,
    encoding: TextEncoding,
) -> FileOutcome {
    let source = match SourceUnit::load(path, encoding) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            log::warn!("{}: problem decoding source", path.display());
            log::debug!("{}: {e}", path.display());
            return FileOutcome::Undecodable(path.to_path_buf());
        }
        Err(e) => {
            return FileOutcome::Failed {
                path: path.to_path_buf(),
                error: e.to_string(),
            }
        }
    };

    let panel = DiagnosticSink::new();
    match mode.run(&source, &panel) {
        Ok(Some(result)) => FileOutcome::Checked { source, result },
        Ok(None) => FileOutcome::Checked {
            source,
            result: AnalysisResult::empty(),
        },
        Err(e) => FileOutcome::Failed {
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    }
}

fn summarize(outcomes: &[FileOutcome]) -> Totals {
    let mut totals = Totals {
        files: outcomes.len(),
        ..Totals::default()
    };
    for outcome in outcomes {
        match outcome {
            FileOutcome::Checked { result, .. } => {
                totals.errors += result.error_count();
                totals.warnings += result.warning_count();
            }
            FileOutcome::Undecodable(_) => {}
            FileOutcome::Failed { .. } => totals.failures += 1,
        }
    }
    totals
}

fn render_failures(outcomes: &[FileOutcome]) -> String {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            FileOutcome::Failed { path, error } => {
                Some(format!("error: {}: {error}\n", path.display()))
            }
            _ => None,
        })
        .collect()
}

fn render_text(outcomes: &[FileOutcome], color: bool) -> String {
    let renderer = TerminalRenderer::new(color);
    let mut out = String::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Checked { source, result } => {
                for diag in &result.diagnostics {
                    out.push_str(&renderer.render(diag, source));
                    out.push('\n');
                }
            }
            FileOutcome::Failed { path, error } => {
                out.push_str(&format!("error: {}: {error}\n\n", path.display()));
            }
            FileOutcome::Undecodable(_) => {}
        }
    }
    out
}

fn render_json(outcomes: &[FileOutcome]) -> String {
    let renderer = JsonRenderer::new();
    let files: Vec<serde_json::Value> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            FileOutcome::Checked { source, result } => Some(renderer.to_value(result, source)),
            FileOutcome::Undecodable(path) => Some(serde_json::json!({
                "path": path.display().to_string(),
                "count": 1,
                "diagnostics": [],
            })),
            FileOutcome::Failed { .. } => None,
        })
        .collect();
    serde_json::to_string_pretty(&files).unwrap_or_else(|_| "[]".to_string())
}
