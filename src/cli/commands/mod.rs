//! Commands shipped with archme.
mod logs;
mod tui;

use std::path::PathBuf;

pub use logs::LogsCommand;
pub use tui::TuiCommand;

use crate::cli::{CliError, CommandRegistry};

/// Registers the built-in commands with the command registry.
///
/// Registration order is the order shown in `archme --help`.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `log_dir` - Directory the `logs` command reads from
///
/// # Errors
///
/// Returns `CliError::DuplicateCommand` if a built-in name is already taken.
pub fn register_commands(registry: &mut CommandRegistry, log_dir: PathBuf) -> Result<(), CliError> {
    registry.register_command(Box::new(TuiCommand::new()))?;
    registry.register_command(Box::new(LogsCommand::new(log_dir)))?;

    Ok(())
}
