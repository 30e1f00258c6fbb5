//! Configuration schema definitions and loading.
//!
//! The configuration file is optional. Every section falls back to its
//! defaults, so a missing file and an empty file behave the same.

mod general;
mod loading;
mod logs;
mod paths;


pub use general::{ColorChoice, GeneralConfig, LogLevel};
pub use logs::LogsConfig;
pub use paths::ConfigPaths;

use serde::{Deserialize, Serialize};

/// Main configuration structure for archme.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Log file settings.
    #[serde(default)]
    pub logs: LogsConfig,
}
