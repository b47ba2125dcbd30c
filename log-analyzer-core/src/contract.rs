//! # contract: shared data types and the file-reading seam
//!
//! This module defines the plain data passed between pipeline stages
//! ([`LogEntry`], [`FileFailure`]) and the single trait ([`LogReader`]) through
//! which the pipeline obtains file bytes.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so tests can simulate unreadable or
//!   malformed files without touching the filesystem.
//! - Mocks are exported with the `test-export-mocks` feature for use in
//!   integration tests of dependent crates.

use async_trait::async_trait;
use mockall::automock;
use std::path::{Path, PathBuf};

use crate::decode::LogFileError;

/// One decoded log record.
///
/// `level` and `message` are never empty once produced by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    /// Keys from the source record outside the fixed schema. Not interpreted.
    pub extra_fields: serde_json::Map<String, serde_json::Value>,
}

/// A file that was excluded from the aggregate, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: LogFileError,
}

/// Source of raw log file bytes.
///
/// The production implementation is [`crate::decode::FsLogReader`]; tests plug
/// in `MockLogReader`.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait LogReader: Send + Sync {
    /// Read the full contents of the file at `path`.
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}
