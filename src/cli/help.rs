//! Help text for the command listing and for individual commands.

use super::{
    formatting::{Styler, padding},
    types::{CommandMetadata, OptionSpec},
};

const INDENT: &str = "  ";
const COLUMN_GAP: usize = 2;

/// Renders the top-level listing of commands in the order given.
pub fn render_command_list(
    program: &str,
    about: &str,
    commands: &[&CommandMetadata],
    styler: Styler,
) -> String {
    let mut lines = Vec::new();

    if !about.is_empty() {
        lines.push(about.to_string());
        lines.push(String::new());
    }
    lines.push(format!(
        "{} {program} <COMMAND> [OPTIONS]",
        styler.header("Usage:")
    ));
    lines.push(String::new());
    lines.push(styler.header("Commands:"));

    if commands.is_empty() {
        lines.push(format!("{INDENT}{}", styler.description("(none registered)")));
    }

    let width = commands
        .iter()
        .map(|metadata| metadata.name.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;

    lines.extend(commands.iter().map(|metadata| {
        format!(
            "{INDENT}{}{}{}",
            styler.command(&metadata.name),
            padding(&metadata.name, width),
            metadata.description
        )
    }));

    lines.push(String::new());
    lines.push(format!(
        "Run '{program} <COMMAND> --help' for more information on a command."
    ));

    lines.join("\n")
}

/// Renders usage, options and examples for one command.
pub fn render_command_usage(program: &str, metadata: &CommandMetadata, styler: Styler) -> String {
    let mut lines = Vec::new();

    if !metadata.description.is_empty() {
        lines.push(metadata.description.clone());
        lines.push(String::new());
    }

    let mut usage = format!("{program} {}", metadata.name);
    for spec in metadata.options.iter().filter(|spec| spec.required) {
        usage.push(' ');
        usage.push_str(&option_synopsis(spec));
    }
    usage.push_str(" [OPTIONS]");
    lines.push(format!("{} {usage}", styler.header("Usage:")));
    lines.push(String::new());

    let rows: Vec<(String, String)> = metadata
        .options
        .iter()
        .map(|spec| (option_column(spec), option_description(spec)))
        .chain(std::iter::once((
            "-h, --help".to_string(),
            "Show this message".to_string(),
        )))
        .collect();
    let width = rows
        .iter()
        .map(|(aliases, _)| aliases.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;

    lines.push(styler.header("Options:"));
    lines.extend(rows.iter().map(|(aliases, description)| {
        format!(
            "{INDENT}{}{}{}",
            styler.option(aliases),
            padding(aliases, width),
            description
        )
    }));

    if !metadata.examples.is_empty() {
        lines.push(String::new());
        lines.push(styler.subheader("Examples:"));
        lines.extend(
            metadata
                .examples
                .iter()
                .map(|example| format!("{INDENT}{}", styler.description(example))),
        );
    }

    lines.join("\n").trim_end().to_string()
}

fn value_placeholder(spec: &OptionSpec) -> String {
    format!("<{}>", spec.kind.to_string().to_uppercase())
}

fn option_synopsis(spec: &OptionSpec) -> String {
    let alias = spec.display_name();

    if spec.takes_value() {
        format!("{alias} {}", value_placeholder(spec))
    } else {
        alias
    }
}

fn option_column(spec: &OptionSpec) -> String {
    if spec.takes_value() {
        format!("{} {}", spec.aliases(), value_placeholder(spec))
    } else {
        spec.aliases()
    }
}

fn option_description(spec: &OptionSpec) -> String {
    let mut description = spec.help.clone();

    let suffix = if spec.required {
        Some("[required]".to_string())
    } else {
        spec.default
            .as_ref()
            .map(|default| format!("[default: {default}]"))
    };

    if let Some(suffix) = suffix {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&suffix);
    }

    description
}
