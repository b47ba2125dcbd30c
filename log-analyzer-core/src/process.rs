//! Concurrent fan-out/fan-in over a set of log files.
//!
//! One tokio task is spawned per file. Each task decodes its file independently
//! and appends the whole batch to a shared collection under a mutex, so entries
//! from one file stay contiguous and in source order while the relative order of
//! files depends on completion order. A failing file is logged and recorded in
//! [`ProcessOutcome::failures`]; it never cancels its siblings. [`process_files`]
//! returns only after every task has finished.

use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};

use crate::contract::{FileFailure, LogEntry, LogReader};
use crate::decode::{decode_log_file, LogFileError};

/// Largest concurrency limit a run accepts.
pub const MAX_CONCURRENCY_LIMIT: usize = Semaphore::MAX_PERMITS;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Maximum number of files decoded at once. `None` means no limit.
    /// Values outside `1..=MAX_CONCURRENCY_LIMIT` are clamped.
    pub max_concurrency: Option<usize>,
}

/// Result of the fan-in: every decoded entry plus the files that were skipped.
#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub entries: Vec<LogEntry>,
    /// In the order the files were given.
    pub failures: Vec<FileFailure>,
}

pub async fn process_files<R>(
    reader: Arc<R>,
    files: Vec<PathBuf>,
    options: ProcessOptions,
) -> ProcessOutcome
where
    R: LogReader + 'static,
{
    info!(
        files = files.len(),
        max_concurrency = ?options.max_concurrency,
        "Processing log files"
    );

    let merged: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let limiter = options
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, MAX_CONCURRENCY_LIMIT))));

    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|path| {
            let reader = Arc::clone(&reader);
            let merged = Arc::clone(&merged);
            let limiter = limiter.clone();
            tokio::spawn(async move {
                // Semaphore is never closed, so acquire only fails if that changes.
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let entries = decode_log_file(reader.as_ref(), &path).await?;
                let count = entries.len();
                merged.lock().await.extend(entries);
                Ok::<usize, LogFileError>(count)
            })
        })
        .collect();

    let results = join_all(handles).await;

    let mut failures = Vec::new();
    for (path, result) in files.into_iter().zip(results) {
        let error = match result {
            Ok(Ok(count)) => {
                info!(path = %path.display(), entries = count, "Merged log file");
                continue;
            }
            Ok(Err(e)) => e,
            Err(join_error) => LogFileError::Aborted {
                path: path.clone(),
                reason: join_error.to_string(),
            },
        };
        warn!(path = %path.display(), error = %error, "Skipping file due to error");
        failures.push(FileFailure { path, error });
    }

    // All tasks have joined; nothing else holds the lock.
    let entries = std::mem::take(&mut *merged.lock().await);

    info!(
        entries = entries.len(),
        failed_files = failures.len(),
        "All log file workers completed"
    );
    ProcessOutcome { entries, failures }
}
