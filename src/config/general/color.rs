use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

/// When to colour help text and error messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when the output stream is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,

    /// Always emit ANSI escapes.
    Always,

    /// Never emit ANSI escapes.
    Never,
}

impl ColorChoice {
    /// Resolves the choice for output written to stdout.
    pub fn enabled(self) -> bool {
        self.enabled_for(&std::io::stdout())
    }

    /// Resolves the choice for output written to stderr.
    pub fn enabled_on_stderr(self) -> bool {
        self.enabled_for(&std::io::stderr())
    }

    /// Resolves the choice for `stream`; `Auto` colours only terminals.
    pub fn enabled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && stream.is_terminal(),
        }
    }
}
