//! Formatting utilities for CLI output.
//!
//! Provides consistent styling for help text and error messages. Styling
//! is switched off as a whole when colour is disabled, so plain output
//! carries no escape codes.

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Applies the CLI colour scheme, or nothing when disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    /// Creates a styler that emits escapes only when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A styler that never emits escapes.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Whether escapes are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, codes: &[&str], text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        format!("{}{}{}", codes.concat(), text, Colors::RESET)
    }

    /// Formats section headers with styling
    pub fn header(&self, text: &str) -> String {
        self.paint(&[Colors::BOLD, Colors::CYAN], text)
    }

    /// Formats subheaders with styling
    pub fn subheader(&self, text: &str) -> String {
        self.paint(&[Colors::BOLD, Colors::YELLOW], text)
    }

    /// Formats command names with styling
    pub fn command(&self, text: &str) -> String {
        self.paint(&[Colors::BOLD, Colors::GREEN], text)
    }

    /// Formats option aliases with styling
    pub fn option(&self, text: &str) -> String {
        self.paint(&[Colors::BOLD, Colors::BLUE], text)
    }

    /// Formats descriptions with muted styling
    pub fn description(&self, text: &str) -> String {
        self.paint(&[Colors::DIM], text)
    }

    /// Formats error messages with red styling
    pub fn error(&self, text: &str) -> String {
        self.paint(&[Colors::BOLD, Colors::RED], text)
    }
}

/// Spaces needed to pad `text` to `width` visible characters.
///
/// Computed on the unstyled text so columns line up once escapes are added.
pub fn padding(text: &str, width: usize) -> String {
    let visible = text.chars().count();
    if visible >= width {
        String::new()
    } else {
        " ".repeat(width - visible)
    }
}
