use std::path::PathBuf;

use tracing::info;

use crate::cli::{
    Command, HandlerResult, ParsedOptions,
    types::{CommandMetadata, OptionSpec},
};

const FOLLOW: &str = "follow";

/// Command to show application logs.
///
/// Reading and tailing the log files is not wired up yet; the command
/// reports which directory it would read and whether it would follow.
///
/// # Example Usage
///
/// ```bash
/// archme logs
/// archme logs -f
/// ```
pub struct LogsCommand {
    log_dir: PathBuf,
}

impl LogsCommand {
    /// Creates a new LogsCommand reading from `log_dir`.
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }
}

impl Command for LogsCommand {
    fn execute(&self, options: &ParsedOptions) -> HandlerResult {
        let follow = options.flag(FOLLOW);
        info!(follow, log_dir = %self.log_dir.display(), "Showing logs");

        let headline = if follow {
            "Following logs... (Ctrl+C to stop)"
        } else {
            "Showing logs once..."
        };

        Ok(format!(
            "{headline}\nLog directory: {}",
            self.log_dir.display()
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "logs".to_string(),
            description: "Show application logs".to_string(),
            options: vec![
                OptionSpec::flag(FOLLOW)
                    .short('f')
                    .help("Follow log output (like tail -f)"),
            ],
            examples: vec!["archme logs".to_string(), "archme logs -f".to_string()],
        }
    }
}
