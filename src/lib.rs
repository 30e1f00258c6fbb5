//! archme - command line interface for arch-me-later.
//!
//! The crate is built around a small command dispatcher: commands declare
//! typed options, register themselves in a [`cli::CommandRegistry`] at
//! startup, and are invoked by name from the process arguments.
//!
//! # Quick Start
//!
//! ```rust
//! use archme::cli::{CommandRegistry, DispatchOutcome, OptionSpec, OptionValue};
//!
//! let mut registry = CommandRegistry::new("archme");
//! registry
//!     .register(
//!         "greet",
//!         |options| Ok(format!("hello x{}", options.integer("times").unwrap_or(1))),
//!         vec![OptionSpec::integer("times").short('n').default_value(OptionValue::Integer(1))],
//!         "Print a greeting",
//!     )
//!     .unwrap();
//!
//! let args = vec!["greet".to_string(), "-n".to_string(), "3".to_string()];
//! match registry.dispatch(&args).unwrap() {
//!     DispatchOutcome::Completed { output, .. } => assert_eq!(output, "hello x3"),
//!     DispatchOutcome::Help(_) => unreachable!(),
//! }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command registry, option parsing and dispatch.
pub mod cli;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{ArchmeError, Result};
