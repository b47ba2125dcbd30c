//! Discovery of log files in a directory (non-recursive `*.json` match).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub const LOG_FILE_PATTERN: &str = "*.json";

/// Fatal errors: any of these stops the run before a file is read.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("log directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("log path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot list log directory '{}': {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("invalid log file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Returns every `*.json` path directly inside `dir`, sorted.
///
/// Only entry names are matched against the pattern, so the directory path
/// itself may contain glob metacharacters or non-UTF-8 bytes. Entries that
/// cannot be read are skipped with a warning.
pub fn discover_log_files(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.exists() {
        error!(log_dir = %dir.display(), "Log directory does not exist");
        return Err(DiscoveryError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        error!(log_dir = %dir.display(), "Log path is not a directory");
        return Err(DiscoveryError::NotADirectory(dir.to_path_buf()));
    }

    let pattern = glob::Pattern::new(LOG_FILE_PATTERN)?;
    debug!(log_dir = %dir.display(), pattern = %pattern, "Listing log directory");

    let listing = fs::read_dir(dir).map_err(|e| {
        error!(log_dir = %dir.display(), error = %e, "Failed to list log directory");
        DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        }
    })?;

    let mut files: Vec<PathBuf> = listing
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(log_dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    info!(log_dir = %dir.display(), count = files.len(), "Discovered log files");
    Ok(files)
}
