use std::fmt;

use thiserror::Error;

use super::options::ParsedOptions;

/// Errors that can occur while registering or dispatching CLI commands.
///
/// Definition errors (`DuplicateCommand`, `InvalidDefinition`) are raised at
/// startup while the registry is populated. The remaining variants describe
/// bad user input or a failing handler and are reported at the dispatch
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A command with this name is already registered.
    #[error("Command '{name}' is already registered")]
    DuplicateCommand {
        /// The conflicting command name
        name: String,
    },

    /// A command or one of its options was declared inconsistently.
    #[error("Invalid definition for command '{command}': {reason}")]
    InvalidDefinition {
        /// Command being registered
        command: String,
        /// What is wrong with the declaration
        reason: String,
    },

    /// No registered command matches the given name.
    #[error("Unknown command '{name}'{}", did_you_mean(.suggestions))]
    UnknownCommand {
        /// The name the user typed
        name: String,
        /// Closest registered names, nearest first
        suggestions: Vec<String>,
    },

    /// A flag or argument the command does not declare.
    #[error("Unknown option '{option}' for command '{command}'")]
    UnknownOption {
        /// Command being parsed
        command: String,
        /// The offending token
        option: String,
    },

    /// A required option was not supplied.
    #[error("Missing required option '{option}' for command '{command}'")]
    MissingOption {
        /// Command being parsed
        command: String,
        /// The option as typed, e.g. `--target` or `-t`
        option: String,
    },

    /// An option value could not be converted to the declared type.
    #[error("Invalid value '{value}' for option '{option}': {reason}")]
    InvalidOptionValue {
        /// The option as typed, e.g. `--count` or `-n`
        option: String,
        /// The raw value supplied
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The command handler ran and reported a failure.
    #[error("Command '{command}' failed: {message}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Message from the handler
        message: String,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Startup definition errors exit with `2`, everything else with `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::DuplicateCommand { .. } | CliError::InvalidDefinition { .. } => 2,
            _ => 1,
        }
    }
}

/// Failure reported by a command handler.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error from any displayable message.
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// The handler's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of running a command handler: output text or a failure.
pub type HandlerResult = Result<String, HandlerError>;

/// Type of value an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// A boolean switch that takes no value on the command line.
    Flag,

    /// Free-form text.
    String,

    /// A signed 64-bit integer.
    Integer,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Flag => write!(f, "flag"),
            OptionKind::String => write!(f, "string"),
            OptionKind::Integer => write!(f, "integer"),
        }
    }
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Value of a flag.
    Bool(bool),

    /// Value of a string option.
    String(String),

    /// Value of an integer option.
    Integer(i64),
}

impl OptionValue {
    /// The kind of option this value belongs to.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Flag,
            OptionValue::String(_) => OptionKind::String,
            OptionValue::Integer(_) => OptionKind::Integer,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::String(s) => write!(f, "\"{s}\""),
            OptionValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Declaration of a single command option.
///
/// Built with a constructor per kind and refined with the chaining methods.
/// The long alias defaults to the option name.
///
/// ```
/// use archme::cli::{OptionSpec, OptionValue};
///
/// let follow = OptionSpec::flag("follow").short('f').help("Follow log output");
/// let lines = OptionSpec::integer("lines")
///     .short('n')
///     .default_value(OptionValue::Integer(20));
/// assert_eq!(follow.long.as_deref(), Some("follow"));
/// assert!(!lines.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Key under which the resolved value is stored.
    pub name: String,

    /// Type of value accepted.
    pub kind: OptionKind,

    /// Value used when the option is not given.
    pub default: Option<OptionValue>,

    /// Single-character alias, used as `-c`.
    pub short: Option<char>,

    /// Long alias, used as `--name`.
    pub long: Option<String>,

    /// Whether dispatch fails when the option is absent.
    pub required: bool,

    /// Human-readable description for help output.
    pub help: String,
}

impl OptionSpec {
    fn new(name: &str, kind: OptionKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: None,
            short: None,
            long: Some(name.to_string()),
            required: false,
            help: String::new(),
        }
    }

    /// Declares a boolean flag. Flags default to `false`.
    pub fn flag(name: &str) -> Self {
        Self::new(name, OptionKind::Flag)
    }

    /// Declares a string option.
    pub fn string(name: &str) -> Self {
        Self::new(name, OptionKind::String)
    }

    /// Declares an integer option.
    pub fn integer(name: &str) -> Self {
        Self::new(name, OptionKind::Integer)
    }

    /// Sets the short alias.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Overrides the long alias.
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Removes the long alias, leaving only the short one.
    pub fn no_long(mut self) -> Self {
        self.long = None;
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: OptionValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Whether the option consumes a value on the command line.
    pub fn takes_value(&self) -> bool {
        self.kind != OptionKind::Flag
    }

    /// The aliases as typed by a user, e.g. `-f, --follow`.
    pub fn aliases(&self) -> String {
        let short = self.short.map(|c| format!("-{c}"));
        let long = self.long.as_ref().map(|l| format!("--{l}"));

        match (short, long) {
            (Some(s), Some(l)) => format!("{s}, {l}"),
            (Some(s), None) => s,
            (None, Some(l)) => format!("    {l}"),
            (None, None) => String::new(),
        }
    }

    /// How the option is referred to in messages and usage lines.
    ///
    /// Prefers the long alias (`--count`), falls back to the short one
    /// (`-n`) and finally to the bare name.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => self.name.clone(),
        }
    }
}

/// Complete metadata for a CLI command.
///
/// This struct serves as the single source of truth for a command's
/// interface: its name, help text, options and usage examples. The registry
/// uses it for help generation, argument parsing and lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    /// The command name (e.g., "logs", "tui").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Declared options, in display order.
    pub options: Vec<OptionSpec>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors and
/// their per-invocation input as already-parsed, typed options.
pub trait Command: Send + Sync {
    /// Executes the command with resolved option values.
    ///
    /// Options have already been validated against [`Command::metadata`],
    /// so every declared flag is present and every required option is set.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] describing why the command failed. The
    /// registry reports it as [`CliError::CommandFailed`].
    fn execute(&self, options: &ParsedOptions) -> HandlerResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}

/// Adapts a closure into a [`Command`].
///
/// Lets callers register a handler without declaring a type for it.
pub struct FnCommand<F> {
    metadata: CommandMetadata,
    handler: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&ParsedOptions) -> HandlerResult + Send + Sync,
{
    /// Wraps `handler` with the given interface.
    pub fn new(name: &str, description: &str, options: Vec<OptionSpec>, handler: F) -> Self {
        Self {
            metadata: CommandMetadata {
                name: name.to_string(),
                description: description.to_string(),
                options,
                examples: Vec::new(),
            },
            handler,
        }
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&ParsedOptions) -> HandlerResult + Send + Sync,
{
    fn execute(&self, options: &ParsedOptions) -> HandlerResult {
        (self.handler)(options)
    }

    fn metadata(&self) -> CommandMetadata {
        self.metadata.clone()
    }
}
