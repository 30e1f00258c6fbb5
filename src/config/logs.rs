use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ArchmeError, Result};

use super::ConfigPaths;

const DEFAULT_RETENTION_DAYS: usize = 7;

/// Settings for the rotating log files written in TUI mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogsConfig {
    /// Directory holding log files. Uses the XDG state directory when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Number of daily log files to keep.
    #[serde(default = "default_retention_days")]
    pub retention_days: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            directory: None,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

fn default_retention_days() -> usize {
    DEFAULT_RETENTION_DAYS
}

impl LogsConfig {
    /// Resolves the log directory, falling back to [`ConfigPaths::log_dir`].
    ///
    /// # Errors
    /// Returns an error if no directory is configured and the default one
    /// cannot be determined.
    pub fn resolve_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(ConfigPaths::log_dir()?),
        }
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.retention_days == 0 {
            return Err(ArchmeError::ConfigValidation {
                component: "logs".to_string(),
                details: "retention_days must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
