//! Command-line interface and command dispatch.
//!
//! Commands are registered in a [`CommandRegistry`] at startup. Dispatch
//! parses process arguments against the matched command's declared options
//! and invokes its handler; help text is generated from command metadata.

mod commands;
pub mod formatting;
mod help;
mod options;
mod registry;
mod service;
mod suggest;
mod types;

#[cfg(test)]
mod tests;

pub use commands::{LogsCommand, TuiCommand, register_commands};
pub use options::{ParseOutcome, ParsedOptions, parse_options};
pub use registry::{CommandRegistry, DispatchOutcome};
pub use service::{CliService, PROGRAM_NAME, exit_code};
pub use suggest::{closest_names, edit_distance};
pub use types::{
    CliError, Command, CommandMetadata, FnCommand, HandlerError, HandlerResult, OptionKind,
    OptionSpec, OptionValue,
};
