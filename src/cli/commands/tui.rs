use tracing::info;

use crate::cli::{Command, HandlerResult, ParsedOptions, types::CommandMetadata};

/// Command to launch the terminal UI.
pub struct TuiCommand {}

impl TuiCommand {
    /// Creates a new TuiCommand
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TuiCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for TuiCommand {
    fn execute(&self, _options: &ParsedOptions) -> HandlerResult {
        info!("TUI requested");
        Ok("The terminal UI is not available yet.".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "tui".to_string(),
            description: "Launch the terminal UI".to_string(),
            options: Vec::new(),
            examples: vec!["archme tui".to_string()],
        }
    }
}
