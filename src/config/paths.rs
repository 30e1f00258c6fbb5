use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "archme";

/// Utility struct for managing configuration and state paths
///
/// Provides methods to locate configuration and log directories following
/// the XDG Base Directory specification
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// Follows the XDG Base Directory specification:
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "archme" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        Self::xdg_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Returns the state directory, `$XDG_STATE_HOME/archme` or `$HOME/.local/state/archme`
    ///
    /// # Errors
    /// Returns an error if neither `XDG_STATE_HOME` nor `HOME` environment variables are set
    pub fn state_dir() -> Result<PathBuf, Error> {
        Self::xdg_dir("XDG_STATE_HOME", ".local/state")
    }

    /// Get the application log directory
    ///
    /// The directory is not created here; the file logger creates it on first write.
    ///
    /// # Errors
    /// Returns an error if the state directory cannot be determined
    pub fn log_dir() -> Result<PathBuf, Error> {
        Ok(Self::state_dir()?.join("logs"))
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn xdg_dir(xdg_var: &str, home_fallback: &str) -> Result<PathBuf, Error> {
        let base = env::var(xdg_var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(home_fallback))
            })
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!("Neither {xdg_var} nor HOME environment variable found"),
                )
            })?;

        Ok(base.join(APP_DIR))
    }
}
