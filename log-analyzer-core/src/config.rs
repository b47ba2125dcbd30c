use std::path::PathBuf;
use tracing::{debug, info};

/// Directory used when neither a flag nor a config file names one.
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Settings for a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyseConfig {
    pub log_dir: PathBuf,
    /// Upper bound on files decoded at once. `None` spawns one task per file.
    pub max_concurrency: Option<usize>,
}

impl Default for AnalyseConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_concurrency: None,
        }
    }
}

impl AnalyseConfig {
    pub fn trace_loaded(&self) {
        info!(
            log_dir = %self.log_dir.display(),
            max_concurrency = ?self.max_concurrency,
            "Loaded AnalyseConfig"
        );
        debug!(?self, "AnalyseConfig loaded (full debug)");
    }
}
