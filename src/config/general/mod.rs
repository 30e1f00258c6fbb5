mod color;
mod log_level;

pub use color::ColorChoice;
pub use log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// General configuration settings for archme.
///
/// Contains global settings that affect the overall behavior of the application,
/// such as logging verbosity and terminal colours.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GeneralConfig {
    /// Logging level for the application.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Colour output for help and errors.
    #[serde(default)]
    pub color: ColorChoice,
}
