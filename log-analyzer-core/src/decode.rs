//! Module for decoding one log file's bytes into [`LogEntry`] values.
//!
//! A file is a JSON array of objects. `level` and `msg` are the recognised keys;
//! missing, null or empty values are replaced with defaults, and every other key
//! is kept in [`LogEntry::extra_fields`]. Any failure rejects the whole file.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::contract::{LogEntry, LogReader};

pub const DEFAULT_LEVEL: &str = "unknown";
pub const DEFAULT_MESSAGE: &str = "No message";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid log JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index}: required field `{field}` is empty")]
    EmptyField { index: usize, field: &'static str },
}

/// Failure to turn one file into entries. Always carries the file path.
#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error decoding {}: {source}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },
    #[error("worker for {} did not complete: {reason}", .path.display())]
    Aborted { path: PathBuf, reason: String },
}

impl LogFileError {
    pub fn path(&self) -> &Path {
        match self {
            LogFileError::Read { path, .. }
            | LogFileError::Decode { path, .. }
            | LogFileError::Aborted { path, .. } => path,
        }
    }
}

#[derive(Deserialize)]
struct RawLogEntry {
    #[serde(default)]
    level: Option<String>,
    #[serde(default, rename = "msg")]
    message: Option<String>,
    #[serde(flatten)]
    extra_fields: serde_json::Map<String, serde_json::Value>,
}

impl RawLogEntry {
    fn with_defaults(self) -> LogEntry {
        LogEntry {
            level: non_empty_or(self.level, DEFAULT_LEVEL),
            message: non_empty_or(self.message, DEFAULT_MESSAGE),
            extra_fields: self.extra_fields,
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn validate(entry: &LogEntry, index: usize) -> Result<(), DecodeError> {
    if entry.level.is_empty() {
        return Err(DecodeError::EmptyField {
            index,
            field: "level",
        });
    }
    if entry.message.is_empty() {
        return Err(DecodeError::EmptyField {
            index,
            field: "msg",
        });
    }
    Ok(())
}

/// Decode a JSON array of log records, in source order.
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<LogEntry>, DecodeError> {
    let raw: Vec<RawLogEntry> = serde_json::from_slice(bytes)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            let entry = record.with_defaults();
            validate(&entry, index)?;
            Ok(entry)
        })
        .collect()
}

/// Read `path` through `reader` and decode it. Errors are tagged with the path.
pub async fn decode_log_file<R>(reader: &R, path: &Path) -> Result<Vec<LogEntry>, LogFileError>
where
    R: LogReader + ?Sized,
{
    let bytes = reader.read(path).await.map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to read log file");
        LogFileError::Read {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let entries = decode_entries(&bytes).map_err(|e| {
        debug!(path = %path.display(), error = %e, "Failed to decode log file");
        LogFileError::Decode {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    debug!(path = %path.display(), entries = entries.len(), "Decoded log file");
    Ok(entries)
}

/// Reads log files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLogReader;

#[async_trait]
impl LogReader for FsLogReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
