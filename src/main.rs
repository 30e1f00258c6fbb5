//! archme - entry point for the arch-me-later command line interface.
//!
//! Loads configuration, sets up logging and hands the process arguments to
//! the command dispatcher. The exit code reflects the dispatch outcome.

use std::{env, fmt, process::ExitCode};

use archme::{
    cli::{CliService, formatting::Styler},
    config::{ColorChoice, Config},
    tracing_config,
};
use tracing::debug;

const TUI_COMMAND: &str = "tui";
const STARTUP_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => return startup_failure(ColorChoice::Auto, e),
    };

    let log_dir = match config.logs.resolve_directory() {
        Ok(dir) => dir,
        Err(e) => return startup_failure(config.general.color, e),
    };

    let _guard = if args.first().map(String::as_str) == Some(TUI_COMMAND) {
        match tracing_config::init_with_file(
            config.general.log_level,
            &log_dir,
            config.logs.retention_days,
        ) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("warning: {e}");
                None
            }
        }
    } else {
        if let Err(e) = tracing_config::init_cli_mode(config.general.log_level) {
            eprintln!("warning: {e}");
        }
        None
    };

    debug!(?args, "Starting archme");

    let service = match CliService::new(&config, log_dir) {
        Ok(service) => service,
        Err(e) => {
            let code = e.exit_code();
            let styler = Styler::new(config.general.color.enabled_on_stderr());
            eprintln!("{}: {e}", styler.error("Error"));
            return ExitCode::from(code);
        }
    };

    service.run(&args)
}

fn startup_failure(color: ColorChoice, error: impl fmt::Display) -> ExitCode {
    let styler = Styler::new(color.enabled_on_stderr());
    eprintln!("{}: {error}", styler.error("Error"));
    ExitCode::from(STARTUP_FAILURE)
}
