//! Parsing of command-line tokens against a command's declared options.

use std::collections::HashMap;

use super::types::{CliError, CommandMetadata, OptionKind, OptionSpec, OptionValue};

const HELP_SHORT: &str = "-h";
const HELP_LONG: &str = "--help";

/// Returns true for the tokens that request help.
pub(crate) fn is_help_flag(token: &str) -> bool {
    token == HELP_SHORT || token == HELP_LONG
}

/// Option values resolved for one invocation, keyed by option name.
///
/// Every declared flag is present. Value options are present when given on
/// the command line or when they declare a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: HashMap<String, OptionValue>,
}

impl ParsedOptions {
    /// Returns the raw value for `name`, if resolved.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Returns the value of a flag. Unknown names read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Bool(true)))
    }

    /// Returns the value of a string option.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of an integer option.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Number of resolved options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option resolved.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn set(&mut self, spec: &OptionSpec, value: OptionValue) {
        self.values.insert(spec.name.clone(), value);
    }
}

/// Outcome of parsing the tokens that follow a command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All tokens were consumed and requirements are met.
    Options(ParsedOptions),

    /// A help flag was found; nothing else was validated.
    HelpRequested,
}

/// Parses `tokens` against the options declared in `metadata`.
///
/// Accepts `--long`, `--long=value`, `--long value`, `-s`, `-s value`,
/// `-svalue` and clusters of short flags such as `-abc`. A separate value
/// may not look like an option; use `--long=value` to pass one that does.
/// A help flag anywhere in `tokens` short-circuits to
/// [`ParseOutcome::HelpRequested`].
///
/// # Errors
///
/// * `CliError::UnknownOption` - for undeclared flags and stray arguments
/// * `CliError::InvalidOptionValue` - for missing or mistyped values
/// * `CliError::MissingOption` - when a required option was not given
pub fn parse_options(
    metadata: &CommandMetadata,
    tokens: &[String],
) -> Result<ParseOutcome, CliError> {
    if tokens.iter().any(|token| is_help_flag(token)) {
        return Ok(ParseOutcome::HelpRequested);
    }

    let mut parser = Parser {
        metadata,
        parsed: ParsedOptions::default(),
    };

    let mut remaining = tokens.iter();
    while let Some(token) = remaining.next() {
        if let Some(body) = token.strip_prefix("--") {
            parser.parse_long(token, body, &mut remaining)?;
        } else if token.len() > 1 && token.starts_with('-') {
            parser.parse_short_cluster(token, &mut remaining)?;
        } else {
            return Err(parser.unknown(token));
        }
    }

    parser.finish().map(ParseOutcome::Options)
}

struct Parser<'a> {
    metadata: &'a CommandMetadata,
    parsed: ParsedOptions,
}

impl Parser<'_> {
    fn parse_long<'t>(
        &mut self,
        token: &str,
        body: &str,
        remaining: &mut impl Iterator<Item = &'t String>,
    ) -> Result<(), CliError> {
        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let metadata = self.metadata;
        let spec = metadata
            .options
            .iter()
            .find(|spec| spec.long.as_deref() == Some(name))
            .filter(|_| !name.is_empty())
            .ok_or_else(|| self.unknown(token))?;

        if spec.takes_value() {
            let raw = match inline_value {
                Some(value) => value.to_string(),
                None => next_value(spec, remaining)?,
            };
            let value = convert(spec, &raw)?;
            self.parsed.set(spec, value);
        } else {
            let enabled = match inline_value {
                Some(raw) => parse_bool(spec, raw)?,
                None => true,
            };
            self.parsed.set(spec, OptionValue::Bool(enabled));
        }

        Ok(())
    }

    fn parse_short_cluster<'t>(
        &mut self,
        token: &str,
        remaining: &mut impl Iterator<Item = &'t String>,
    ) -> Result<(), CliError> {
        let metadata = self.metadata;
        let body = &token[1..];

        for (offset, short) in body.char_indices() {
            let spec = metadata
                .options
                .iter()
                .find(|spec| spec.short == Some(short))
                .ok_or_else(|| self.unknown(&format!("-{short}")))?;

            if !spec.takes_value() {
                self.parsed.set(spec, OptionValue::Bool(true));
                continue;
            }

            let attached = &body[offset + short.len_utf8()..];
            let attached = attached.strip_prefix('=').unwrap_or(attached);
            let raw = if attached.is_empty() {
                next_value(spec, remaining)?
            } else {
                attached.to_string()
            };

            let value = convert(spec, &raw)?;
            self.parsed.set(spec, value);
            return Ok(());
        }

        Ok(())
    }

    fn finish(mut self) -> Result<ParsedOptions, CliError> {
        let metadata = self.metadata;
        for spec in &metadata.options {
            if self.parsed.get(&spec.name).is_some() {
                continue;
            }

            if let Some(default) = &spec.default {
                self.parsed.set(spec, default.clone());
            } else if spec.required {
                return Err(CliError::MissingOption {
                    command: metadata.name.clone(),
                    option: spec.display_name(),
                });
            } else if spec.kind == OptionKind::Flag {
                self.parsed.set(spec, OptionValue::Bool(false));
            }
        }

        Ok(self.parsed)
    }

    fn unknown(&self, token: &str) -> CliError {
        CliError::UnknownOption {
            command: self.metadata.name.clone(),
            option: token.to_string(),
        }
    }
}

/// Takes the token after a value option as its value.
///
/// A token that looks like another option is not taken: the value is
/// reported missing instead. Negative numbers such as `-5` are values.
fn next_value<'t>(
    spec: &OptionSpec,
    remaining: &mut impl Iterator<Item = &'t String>,
) -> Result<String, CliError> {
    match remaining.next() {
        Some(token) if !looks_like_option(token) => Ok(token.clone()),
        _ => Err(value_required(spec)),
    }
}

fn looks_like_option(token: &str) -> bool {
    if token.starts_with("--") {
        return true;
    }

    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| !c.is_ascii_digit())
}

fn value_required(spec: &OptionSpec) -> CliError {
    CliError::InvalidOptionValue {
        option: spec.display_name(),
        value: String::new(),
        reason: format!("{} value is required", spec.kind),
    }
}

fn convert(spec: &OptionSpec, raw: &str) -> Result<OptionValue, CliError> {
    match spec.kind {
        OptionKind::String => Ok(OptionValue::String(raw.to_string())),
        OptionKind::Integer => raw.trim().parse::<i64>().map(OptionValue::Integer).map_err(|_| {
            CliError::InvalidOptionValue {
                option: spec.display_name(),
                value: raw.to_string(),
                reason: "expected an integer".to_string(),
            }
        }),
        OptionKind::Flag => parse_bool(spec, raw).map(OptionValue::Bool),
    }
}

fn parse_bool(spec: &OptionSpec, raw: &str) -> Result<bool, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(CliError::InvalidOptionValue {
            option: spec.display_name(),
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
