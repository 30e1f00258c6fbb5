use std::{path::PathBuf, process::ExitCode};

use tracing::{error, info};

use crate::config::Config;

use super::{
    CliError, CommandRegistry, DispatchOutcome, commands,
    formatting::Styler,
};

/// Name used in usage lines and help text.
pub const PROGRAM_NAME: &str = "archme";

const ABOUT: &str = "arch-me-later command line interface";

/// High-level service for running CLI commands.
///
/// Owns the command registry for the lifetime of the process. Commands are
/// registered once in [`CliService::new`]; afterwards the service only
/// dispatches.
pub struct CliService {
    registry: CommandRegistry,
    error_styler: Styler,
}

impl CliService {
    /// Creates a new CLI service with all built-in commands registered.
    ///
    /// # Arguments
    /// * `config` - Loaded configuration; supplies the colour choice, resolved
    ///   against stdout for help and against stderr for errors
    /// * `log_dir` - Resolved log directory, handed to the `logs` command
    ///
    /// # Errors
    /// Returns `CliError::DuplicateCommand` or `CliError::InvalidDefinition`
    /// if a built-in command is declared incorrectly.
    pub fn new(config: &Config, log_dir: PathBuf) -> Result<Self, CliError> {
        let color = config.general.color;

        let mut registry = CommandRegistry::new(PROGRAM_NAME)
            .with_about(ABOUT)
            .with_styler(Styler::new(color.enabled()));
        commands::register_commands(&mut registry, log_dir)?;

        Ok(Self {
            registry,
            error_styler: Styler::new(color.enabled_on_stderr()),
        })
    }

    /// Wraps an already populated registry.
    ///
    /// `error_styler` styles the error lines written to stderr; help text
    /// uses the registry's own styler.
    pub fn with_registry(registry: CommandRegistry, error_styler: Styler) -> Self {
        Self {
            registry,
            error_styler,
        }
    }

    /// Dispatches `args` (excluding the program name) without printing.
    ///
    /// # Errors
    /// Returns any `CliError` produced while parsing or running the command.
    pub fn execute(&self, args: &[String]) -> Result<DispatchOutcome, CliError> {
        self.registry.dispatch(args)
    }

    /// Dispatches `args`, prints the outcome and returns the exit code.
    ///
    /// Help and command output go to stdout, errors to stderr.
    pub fn run(&self, args: &[String]) -> ExitCode {
        let result = self.execute(args);

        match &result {
            Ok(DispatchOutcome::Help(text)) => println!("{text}"),
            Ok(DispatchOutcome::Completed { command, output }) => {
                info!(%command, "Command completed");
                if !output.trim().is_empty() {
                    println!("{output}");
                }
            }
            Err(e) => {
                error!(error = %e, "Dispatch failed");
                eprintln!("{}: {}", self.error_styler.error("Error"), e);
            }
        }

        ExitCode::from(exit_code(&result))
    }

    /// Lists `(name, description)` for every registered command.
    pub fn list_all(&self) -> Vec<(String, String)> {
        self.registry.list_commands()
    }
}

/// Maps a dispatch result to a process exit code.
///
/// Success and help exit with `0`; errors use [`CliError::exit_code`].
pub fn exit_code(result: &Result<DispatchOutcome, CliError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}
