/// `load_config` module: reads the optional YAML config file and merges it with
/// command-line flags into the core [`AnalyseConfig`].
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`FileConfig`]
/// - Apply precedence: flags, then file, then built-in defaults
/// - Reject settings the pipeline cannot run with (a concurrency limit of 0 or
///   one above [`MAX_CONCURRENCY_LIMIT`])
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary as a
/// non-zero exit.
///
/// Accepted keys: `log_dir` (path) and `max_concurrency` (positive integer).
use anyhow::Result;
use log_analyzer_core::config::{AnalyseConfig, DEFAULT_LOG_DIR};
use log_analyzer_core::process::MAX_CONCURRENCY_LIMIT;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

/// Loads a YAML config file. An empty file is the same as no settings.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Merges flag values over the file config and defaults.
pub fn resolve(
    log_dir: Option<PathBuf>,
    max_concurrency: Option<usize>,
    file: Option<FileConfig>,
) -> Result<AnalyseConfig> {
    let file = file.unwrap_or_default();

    let log_dir = log_dir
        .or(file.log_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    let max_concurrency = max_concurrency.or(file.max_concurrency);

    if max_concurrency == Some(0) {
        error!("max_concurrency must be at least 1");
        anyhow::bail!("max_concurrency must be at least 1");
    }
    if let Some(limit) = max_concurrency.filter(|&n| n > MAX_CONCURRENCY_LIMIT) {
        error!(max_concurrency = limit, "max_concurrency is too large");
        anyhow::bail!("max_concurrency must be at most {MAX_CONCURRENCY_LIMIT}, got {limit}");
    }

    Ok(AnalyseConfig {
        log_dir,
        max_concurrency,
    })
}
