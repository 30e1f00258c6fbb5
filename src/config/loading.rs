use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, instrument};

use super::{Config, ConfigPaths};
use crate::{ArchmeError, Result};

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// the file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is invalid
    /// - A value fails validation
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(ArchmeError::io_at(&e, path)),
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| ArchmeError::toml_parse(e, Some(path)))?;
        config.validate()?;

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value fails validation.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| ArchmeError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.logs.validate()
    }
}
