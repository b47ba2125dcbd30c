//! High-level pipeline: discover → decode in parallel → summarise.
//!
//! # Responsibilities
//! - Fail fast on configuration problems (missing directory, bad pattern)
//!   before any file is read
//! - Short-circuit with [`AnalyseOutcome::NoLogFiles`] when nothing matches
//! - Run the concurrent file processor, then build the [`Summary`] from the
//!   completed entry set only after every worker has joined
//!
//! # Error Handling
//! Only [`AnalyseError`] escapes this module. Per-file problems are returned as
//! data in [`AnalysisReport::failed_files`] for the caller to surface.

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

use crate::config::AnalyseConfig;
use crate::contract::{FileFailure, LogReader};
use crate::discover::{discover_log_files, DiscoveryError};
use crate::process::{process_files, ProcessOptions};
use crate::report::Summary;

#[derive(Debug, Error)]
pub enum AnalyseError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[derive(Debug)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub files_discovered: usize,
    pub failed_files: Vec<FileFailure>,
    /// Time spent decoding and summarising, excluding discovery.
    pub elapsed: Duration,
}

#[derive(Debug)]
pub enum AnalyseOutcome {
    /// The directory exists but holds no `*.json` files.
    NoLogFiles,
    Completed(AnalysisReport),
}

pub async fn analyse<R>(config: &AnalyseConfig, reader: Arc<R>) -> Result<AnalyseOutcome, AnalyseError>
where
    R: LogReader + 'static,
{
    info!(log_dir = %config.log_dir.display(), "[ANALYSE] Starting log analysis");

    let files = discover_log_files(&config.log_dir)?;
    if files.is_empty() {
        info!(log_dir = %config.log_dir.display(), "[ANALYSE] No log files found");
        return Ok(AnalyseOutcome::NoLogFiles);
    }
    let files_discovered = files.len();

    let started = Instant::now();
    let options = ProcessOptions {
        max_concurrency: config.max_concurrency,
    };
    let outcome = process_files(reader, files, options).await;
    let summary = Summary::from_entries(&outcome.entries);
    let elapsed = started.elapsed();

    info!(
        files = files_discovered,
        failed = outcome.failures.len(),
        total_logs = summary.total_logs,
        elapsed = ?elapsed,
        "[ANALYSE] Summary built"
    );

    Ok(AnalyseOutcome::Completed(AnalysisReport {
        summary,
        files_discovered,
        failed_files: outcome.failures,
        elapsed,
    }))
}
