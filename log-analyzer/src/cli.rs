///
/// This module implements the CLI interface for log-analyzer: argument parsing,
/// config resolution, and printing the report.
///
/// All pipeline logic (decoding, concurrent processing, aggregation) lives in the
/// [`log-analyzer-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: run the `log-analyzer` binary with `--help`.
/// - For programmatic/integration use: call [`run`] or [`run_with_output`] with a
///   constructed [`Cli`].
///
/// [`log-analyzer-core`]: ../../log-analyzer-core/
use crate::load_config::{load_config, resolve};
use anyhow::Result;
use clap::Parser;
use log_analyzer_core::analyse::{analyse, AnalyseOutcome};
use log_analyzer_core::decode::FsLogReader;
use log_analyzer_core::report::format_processing_time;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub const NO_LOG_FILES_MESSAGE: &str = "No log files found in the directory.";

/// CLI for log-analyzer: summarise a directory of JSON log files.
#[derive(Parser, Debug)]
#[clap(
    name = "log-analyzer",
    version,
    about = "Analyse JSON log files concurrently and print a summary report"
)]
pub struct Cli {
    /// Path to the log directory containing log files [default: ./logs]
    #[clap(long = "logdir", value_name = "PATH")]
    pub logdir: Option<PathBuf>,

    /// Optional YAML config file (keys: log_dir, max_concurrency)
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of log files decoded at the same time [default: unbounded]
    #[clap(long, value_name = "N")]
    pub max_concurrency: Option<usize>,
}

/// Extracted async CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    let mut out = std::io::stdout();
    run_with_output(cli, &mut out).await
}

/// Same as [`run`], writing the user-facing output to `out`.
pub async fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let config = resolve(cli.logdir, cli.max_concurrency, file_config)?;
    config.trace_loaded();

    match analyse(&config, Arc::new(FsLogReader)).await? {
        AnalyseOutcome::NoLogFiles => {
            tracing::info!(command = "analyse", "No log files to analyse");
            writeln!(out, "{NO_LOG_FILES_MESSAGE}")?;
        }
        AnalyseOutcome::Completed(report) => {
            tracing::info!(
                command = "analyse",
                files = report.files_discovered,
                failed = report.failed_files.len(),
                "Analysis complete"
            );
            write!(out, "{}", report.summary.render())?;
            writeln!(out, "{}", format_processing_time(report.elapsed))?;
        }
    }
    out.flush()?;
    Ok(())
}
