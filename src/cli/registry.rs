use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use super::{
    CliError, Command,
    formatting::Styler,
    help::{render_command_list, render_command_usage},
    options::{ParseOutcome, ParsedOptions, is_help_flag, parse_options},
    suggest::closest_names,
    types::{CommandMetadata, FnCommand, HandlerResult, OptionKind, OptionSpec},
};

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Help text was requested; no handler ran.
    Help(String),

    /// A handler ran to completion.
    Completed {
        /// Name of the command that ran
        command: String,
        /// Text the handler produced
        output: String,
    },
}

struct RegisteredCommand {
    metadata: CommandMetadata,
    command: Box<dyn Command>,
}

/// Registry of CLI commands in registration order.
///
/// Commands are registered once at startup and never change afterwards.
/// Dispatch looks a command up by name, parses the remaining arguments
/// against its declared options and runs it.
///
/// ```
/// use archme::cli::{CommandRegistry, DispatchOutcome, OptionSpec};
///
/// let mut registry = CommandRegistry::new("archme");
/// registry
///     .register(
///         "logs",
///         |options| Ok(format!("follow={}", options.flag("follow"))),
///         vec![OptionSpec::flag("follow").short('f')],
///         "Show application logs",
///     )
///     .unwrap();
///
/// let args = vec!["logs".to_string(), "-f".to_string()];
/// let outcome = registry.dispatch(&args).unwrap();
/// assert_eq!(
///     outcome,
///     DispatchOutcome::Completed {
///         command: "logs".to_string(),
///         output: "follow=true".to_string(),
///     }
/// );
/// ```
pub struct CommandRegistry {
    program: String,
    about: String,
    styler: Styler,
    commands: Vec<RegisteredCommand>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry for the given program name.
    ///
    /// The program name is only used in help text.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            about: String::new(),
            styler: Styler::plain(),
            commands: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Sets the one-line description shown above the command listing.
    pub fn with_about(mut self, about: &str) -> Self {
        self.about = about.to_string();
        self
    }

    /// Sets the styler used for help text.
    pub fn with_styler(mut self, styler: Styler) -> Self {
        self.styler = styler;
        self
    }

    /// Registers a command implementation.
    ///
    /// The command's name is taken from its metadata.
    ///
    /// # Errors
    ///
    /// * `CliError::DuplicateCommand` - a command with the same name exists
    /// * `CliError::InvalidDefinition` - the name or options are malformed
    pub fn register_command(&mut self, command: Box<dyn Command>) -> Result<(), CliError> {
        let metadata = command.metadata();
        Self::validate_definition(&metadata)?;

        if self.index.contains_key(&metadata.name) {
            return Err(CliError::DuplicateCommand {
                name: metadata.name,
            });
        }

        debug!(command = %metadata.name, options = metadata.options.len(), "Registered command");
        self.index.insert(metadata.name.clone(), self.commands.len());
        self.commands.push(RegisteredCommand { metadata, command });

        Ok(())
    }

    /// Registers a closure as a command.
    ///
    /// # Errors
    ///
    /// Same as [`CommandRegistry::register_command`].
    pub fn register<F>(
        &mut self,
        name: &str,
        handler: F,
        options: Vec<OptionSpec>,
        help: &str,
    ) -> Result<(), CliError>
    where
        F: Fn(&ParsedOptions) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_command(Box::new(FnCommand::new(name, help, options, handler)))
    }

    /// Parses `args` (without the program name) and runs the matching command.
    ///
    /// An empty `args` or a leading `-h`/`--help` renders the command listing.
    /// A help flag after a command name renders that command's usage.
    ///
    /// # Errors
    ///
    /// * `CliError::UnknownCommand` - no command matches the first argument
    /// * `CliError::UnknownOption` - an undeclared flag or stray argument
    /// * `CliError::InvalidOptionValue` - a value of the wrong type
    /// * `CliError::MissingOption` - a required option was not given
    /// * `CliError::CommandFailed` - the handler reported a failure
    #[instrument(skip(self), fields(program = %self.program))]
    pub fn dispatch(&self, args: &[String]) -> Result<DispatchOutcome, CliError> {
        let Some(command_name) = args.first().filter(|first| !is_help_flag(first)) else {
            return Ok(DispatchOutcome::Help(self.render_help()));
        };

        let found = self.find(command_name).ok_or_else(|| {
            let suggestions = closest_names(command_name, self.names());
            CliError::UnknownCommand {
                name: command_name.to_string(),
                suggestions,
            }
        })?;

        let options = match parse_options(&found.metadata, &args[1..])? {
            ParseOutcome::Options(options) => options,
            ParseOutcome::HelpRequested => {
                return Ok(DispatchOutcome::Help(render_command_usage(
                    &self.program,
                    &found.metadata,
                    self.styler,
                )));
            }
        };

        debug!(command = %command_name, ?options, "Dispatching command");

        let output = found.command.execute(&options).map_err(|e| {
            warn!(command = %command_name, error = %e, "Command failed");
            CliError::CommandFailed {
                command: command_name.to_string(),
                message: e.message().to_string(),
            }
        })?;

        Ok(DispatchOutcome::Completed {
            command: command_name.to_string(),
            output,
        })
    }

    /// Renders the top-level help listing.
    pub fn render_help(&self) -> String {
        let metadata: Vec<&CommandMetadata> = self.commands.iter().map(|c| &c.metadata).collect();
        render_command_list(&self.program, &self.about, &metadata, self.styler)
    }

    /// Lists `(name, description)` for every command in registration order.
    pub fn list_commands(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .map(|c| (c.metadata.name.clone(), c.metadata.description.clone()))
            .collect()
    }

    /// Returns the metadata of a registered command.
    pub fn metadata(&self, name: &str) -> Option<&CommandMetadata> {
        self.find(name).map(|c| &c.metadata)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn find(&self, name: &str) -> Option<&RegisteredCommand> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.metadata.name.as_str())
    }

    fn validate_definition(metadata: &CommandMetadata) -> Result<(), CliError> {
        let invalid = |reason: String| CliError::InvalidDefinition {
            command: metadata.name.clone(),
            reason,
        };

        if metadata.name.is_empty() {
            return Err(invalid("command name must not be empty".to_string()));
        }
        if metadata.name.starts_with('-') || metadata.name.contains(char::is_whitespace) {
            return Err(invalid(
                "command name must not start with '-' or contain whitespace".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();

        for spec in &metadata.options {
            if !names.insert(spec.name.as_str()) {
                return Err(invalid(format!("option '{}' declared twice", spec.name)));
            }

            if spec.long.is_none() && spec.short.is_none() {
                return Err(invalid(format!("option '{}' has no alias", spec.name)));
            }

            if let Some(long) = &spec.long {
                if long.is_empty() || long.contains('=') || long == "help" {
                    return Err(invalid(format!("invalid long alias '--{long}'")));
                }
                if !longs.insert(long.as_str()) {
                    return Err(invalid(format!("alias '--{long}' used twice")));
                }
            }

            if let Some(short) = spec.short {
                if short == 'h' || short == '-' || short == '=' {
                    return Err(invalid(format!("invalid short alias '-{short}'")));
                }
                if !shorts.insert(short) {
                    return Err(invalid(format!("alias '-{short}' used twice")));
                }
            }

            if let Some(default) = &spec.default {
                if default.kind() != spec.kind {
                    return Err(invalid(format!(
                        "default for '{}' is a {} but the option is a {}",
                        spec.name,
                        default.kind(),
                        spec.kind
                    )));
                }
            }

            if spec.required && spec.kind == OptionKind::Flag {
                return Err(invalid(format!(
                    "flag '{}' cannot be required",
                    spec.name
                )));
            }
        }

        Ok(())
    }
}
