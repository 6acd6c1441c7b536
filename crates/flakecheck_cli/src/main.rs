//! flakecheck CLI — reports pyflakes findings as severity-tagged diagnostics.
//!
//! `flakecheck check [PATHS...]` discovers Python files, runs pyflakes over
//! each of them, and renders the diagnostics as text or JSON.

#![warn(missing_docs)]

mod check;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// flakecheck — pyflakes findings as errors and warnings.
#[derive(Parser, Debug)]
#[command(name = "flakecheck", version, about = "Check Python code using pyflakes")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `flakecheck.toml` file or the directory holding one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check Python files and report diagnostics.
    Check(CheckArgs),
}

/// Arguments for the `flakecheck check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files or directories to check. Defaults to the current directory.
    pub paths: Vec<String>,

    /// Encoding label used to read source files (overrides the config).
    #[arg(long)]
    pub encoding: Option<String>,

    /// Python interpreter that runs pyflakes (overrides the config).
    #[arg(long)]
    pub python: Option<String>,

    /// Output format for diagnostics (overrides the config).
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or its directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    init_logger(cli.quiet, cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The default log filter for the given verbosity flags.
fn default_log_filter(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initializes `env_logger`; `RUST_LOG` wins over the flags.
fn init_logger(quiet: bool, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(default_log_filter(quiet, verbose));
    if let Err(e) = env_logger::try_init_from_env(env) {
        eprintln!("warning: couldn't init logger: {e}");
    }
}
