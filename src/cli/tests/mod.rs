//! Unit tests for CLI module
//!
//! Tests command registration, option parsing, help rendering and
//! suggestions. Handlers are closures that record their calls.

#![allow(clippy::panic)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::cli::{
    CliError, CommandRegistry, DispatchOutcome, HandlerError, OptionSpec, OptionValue,
    ParseOutcome, ParsedOptions, closest_names, edit_distance, exit_code,
    formatting::{Styler, padding},
    parse_options,
    types::CommandMetadata,
};

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn logs_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::flag("follow")
            .short('f')
            .long("follow")
            .default_value(OptionValue::Bool(false))
            .help("Follow log output"),
    ]
}

fn deploy_metadata() -> CommandMetadata {
    CommandMetadata {
        name: "deploy".to_string(),
        description: "Deploy a target".to_string(),
        options: vec![
            OptionSpec::string("target").short('t').required(),
            OptionSpec::integer("retries")
                .short('r')
                .default_value(OptionValue::Integer(3)),
            OptionSpec::flag("verbose").short('v'),
            OptionSpec::flag("dry-run").short('d'),
            OptionSpec::string("note"),
        ],
        examples: vec!["archme deploy -t prod".to_string()],
    }
}

fn parsed(tokens: &[&str]) -> ParsedOptions {
    match parse_options(&deploy_metadata(), &args(tokens)) {
        Ok(ParseOutcome::Options(options)) => options,
        other => panic!("Expected parsed options, got {other:?}"),
    }
}

/// Registry with a recording `logs` command.
fn recording_registry() -> (CommandRegistry, Arc<Mutex<Vec<bool>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);

    let mut registry = CommandRegistry::new("archme");
    registry
        .register(
            "logs",
            move |options| {
                let follow = options.flag("follow");
                recorded.lock().unwrap().push(follow);
                Ok(format!("follow={follow}"))
            },
            logs_options(),
            "Show application logs",
        )
        .unwrap();

    (registry, calls)
}

fn counting_command(registry: &mut CommandRegistry, name: &str, counter: &Arc<AtomicUsize>) {
    let counter = Arc::clone(counter);
    registry
        .register(
            name,
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(String::new())
            },
            Vec::new(),
            "",
        )
        .unwrap();
}

mod registration {
    use super::*;

    #[test]
    fn duplicate_name_is_rejected() {
        let (mut registry, _) = recording_registry();

        let result = registry.register("logs", |_| Ok(String::new()), Vec::new(), "again");

        assert_eq!(
            result,
            Err(CliError::DuplicateCommand {
                name: "logs".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn preserves_registration_order() {
        let mut registry = CommandRegistry::new("archme");
        for name in ["tui", "logs", "sync"] {
            registry
                .register(name, |_| Ok(String::new()), Vec::new(), name)
                .unwrap();
        }

        let names: Vec<String> = registry
            .list_commands()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["tui", "logs", "sync"]);
    }

    #[test]
    fn rejects_malformed_definitions() {
        let cases = vec![
            ("", Vec::new()),
            ("-x", Vec::new()),
            ("two words", Vec::new()),
            (
                "dup",
                vec![OptionSpec::flag("a"), OptionSpec::flag("a").long("other")],
            ),
            (
                "alias",
                vec![OptionSpec::flag("a").short('x'), OptionSpec::flag("b").short('x')],
            ),
            ("help", vec![OptionSpec::flag("help")]),
            ("short-help", vec![OptionSpec::flag("a").short('h')]),
            (
                "bad-default",
                vec![OptionSpec::integer("n").default_value(OptionValue::String("x".into()))],
            ),
            ("required-flag", vec![OptionSpec::flag("a").required()]),
            ("no-alias", vec![OptionSpec::string("a").no_long()]),
        ];

        for (name, options) in cases {
            let mut registry = CommandRegistry::new("archme");
            let result = registry.register(name, |_| Ok(String::new()), options, "");
            assert!(
                matches!(result, Err(CliError::InvalidDefinition { .. })),
                "{name:?} should be rejected, got {result:?}"
            );
            assert!(registry.is_empty());
        }
    }

    #[test]
    fn definition_errors_use_startup_exit_code() {
        let error = CliError::DuplicateCommand {
            name: "logs".to_string(),
        };
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn exposes_metadata() {
        let (registry, _) = recording_registry();

        let metadata = registry.metadata("logs").unwrap();
        assert_eq!(metadata.description, "Show application logs");
        assert_eq!(metadata.options.len(), 1);
        assert!(registry.metadata("missing").is_none());
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn logs_without_flag_uses_default() {
        let (registry, calls) = recording_registry();

        let outcome = registry.dispatch(&args(&["logs"])).unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Completed {
                command: "logs".to_string(),
                output: "follow=false".to_string(),
            }
        );
        assert_eq!(*calls.lock().unwrap(), vec![false]);
    }

    #[test]
    fn logs_short_and_long_flag() {
        let (registry, calls) = recording_registry();

        registry.dispatch(&args(&["logs", "-f"])).unwrap();
        registry.dispatch(&args(&["logs", "--follow"])).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec![true, true]);
    }

    #[test]
    fn logs_unknown_flag_is_rejected() {
        let (registry, calls) = recording_registry();

        let result = registry.dispatch(&args(&["logs", "--bogus"]));

        assert_eq!(
            result,
            Err(CliError::UnknownOption {
                command: "logs".to_string(),
                option: "--bogus".to_string(),
            })
        );
        assert_ne!(exit_code(&result), 0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_args_and_help_flags_show_listing() {
        let (registry, calls) = recording_registry();

        let cases: [&[&str]; 4] = [&[], &["--help"], &["-h"], &["-h", "logs"]];
        for tokens in cases {
            let result = registry.dispatch(&args(tokens));
            match &result {
                Ok(DispatchOutcome::Help(text)) => assert!(text.contains("logs")),
                other => panic!("Expected help for {tokens:?}, got {other:?}"),
            }
            assert_eq!(exit_code(&result), 0);
        }

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn command_help_does_not_invoke_handler() {
        let (registry, calls) = recording_registry();

        let outcome = registry.dispatch(&args(&["logs", "--help"])).unwrap();

        match outcome {
            DispatchOutcome::Help(text) => {
                assert!(text.contains("Usage: archme logs [OPTIONS]"));
                assert!(text.contains("-f, --follow"));
            }
            other => panic!("Expected command help, got {other:?}"),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_command_suggests_close_names() {
        let (registry, calls) = recording_registry();

        let result = registry.dispatch(&args(&["lgs"]));

        assert_eq!(
            result,
            Err(CliError::UnknownCommand {
                name: "lgs".to_string(),
                suggestions: vec!["logs".to_string()],
            })
        );
        assert_eq!(exit_code(&result), 1);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_command_message_lists_suggestions() {
        let error = CliError::UnknownCommand {
            name: "lgs".to_string(),
            suggestions: vec!["logs".to_string()],
        };
        assert_eq!(error.to_string(), "Unknown command 'lgs'. Did you mean: logs?");

        let error = CliError::UnknownCommand {
            name: "zzz".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(error.to_string(), "Unknown command 'zzz'");
    }

    #[test]
    fn each_dispatch_invokes_exactly_one_handler_once() {
        let tui = Arc::new(AtomicUsize::new(0));
        let sync = Arc::new(AtomicUsize::new(0));
        let mut registry = CommandRegistry::new("archme");
        counting_command(&mut registry, "tui", &tui);
        counting_command(&mut registry, "sync", &sync);

        registry.dispatch(&args(&["tui"])).unwrap();
        assert_eq!(tui.load(Ordering::SeqCst), 1);
        assert_eq!(sync.load(Ordering::SeqCst), 0);

        registry.dispatch(&args(&["sync"])).unwrap();
        assert_eq!(tui.load(Ordering::SeqCst), 1);
        assert_eq!(sync.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_required_option_skips_handler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let mut registry = CommandRegistry::new("archme");
        registry
            .register(
                "deploy",
                move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(String::new())
                },
                vec![OptionSpec::string("target").short('t').required()],
                "Deploy",
            )
            .unwrap();

        let result = registry.dispatch(&args(&["deploy"]));

        assert_eq!(
            result,
            Err(CliError::MissingOption {
                command: "deploy".to_string(),
                option: "--target".to_string(),
            })
        );
        assert_ne!(exit_code(&result), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        registry.dispatch(&args(&["deploy", "-t", "prod"])).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_failure_becomes_command_failed() {
        let mut registry = CommandRegistry::new("archme");
        registry
            .register(
                "sync",
                |_| Err(HandlerError::new("mirror unreachable")),
                Vec::new(),
                "Sync packages",
            )
            .unwrap();

        let result = registry.dispatch(&args(&["sync"]));

        assert_eq!(
            result,
            Err(CliError::CommandFailed {
                command: "sync".to_string(),
                message: "mirror unreachable".to_string(),
            })
        );
        assert_eq!(exit_code(&result), 1);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn applies_defaults_and_flags() {
        let options = parsed(&["-t", "prod"]);

        assert_eq!(options.string("target"), Some("prod"));
        assert_eq!(options.integer("retries"), Some(3));
        assert!(!options.flag("verbose"));
        assert!(!options.flag("dry-run"));
        assert_eq!(options.get("note"), None);
    }

    #[test]
    fn accepts_all_value_forms() {
        assert_eq!(parsed(&["--target", "a"]).string("target"), Some("a"));
        assert_eq!(parsed(&["--target=b"]).string("target"), Some("b"));
        assert_eq!(parsed(&["-tc"]).string("target"), Some("c"));
        assert_eq!(parsed(&["-t=d"]).string("target"), Some("d"));
        assert_eq!(parsed(&["-t", "x", "-r", "-2"]).integer("retries"), Some(-2));
    }

    #[test]
    fn clusters_short_flags() {
        let options = parsed(&["-vd", "-t", "prod"]);
        assert!(options.flag("verbose"));
        assert!(options.flag("dry-run"));

        let options = parsed(&["-vtprod"]);
        assert!(options.flag("verbose"));
        assert_eq!(options.string("target"), Some("prod"));
    }

    #[test]
    fn last_repeated_option_wins() {
        let options = parsed(&["-t", "a", "--target", "b"]);
        assert_eq!(options.string("target"), Some("b"));
    }

    #[test]
    fn flag_accepts_explicit_boolean() {
        assert!(parsed(&["-t", "x", "--verbose=true"]).flag("verbose"));
        assert!(!parsed(&["-t", "x", "--verbose=no"]).flag("verbose"));
    }

    #[test]
    fn rejects_non_integer_value() {
        let result = parse_options(&deploy_metadata(), &args(&["-t", "x", "--retries", "many"]));

        assert_eq!(
            result,
            Err(CliError::InvalidOptionValue {
                option: "--retries".to_string(),
                value: "many".to_string(),
                reason: "expected an integer".to_string(),
            })
        );
    }

    #[test]
    fn rejects_missing_value() {
        let result = parse_options(&deploy_metadata(), &args(&["--target"]));

        assert!(matches!(
            result,
            Err(CliError::InvalidOptionValue { ref option, .. }) if option == "--target"
        ));
    }

    #[test]
    fn rejects_bad_flag_value() {
        let result = parse_options(&deploy_metadata(), &args(&["-t", "x", "--verbose=maybe"]));

        assert!(matches!(result, Err(CliError::InvalidOptionValue { .. })));
    }

    #[test]
    fn rejects_stray_arguments_and_unknown_shorts() {
        for tokens in [&["-t", "x", "extra"][..], &["-t", "x", "-q"][..], &["--"][..]] {
            let result = parse_options(&deploy_metadata(), &args(tokens));
            assert!(
                matches!(result, Err(CliError::UnknownOption { .. })),
                "{tokens:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn value_option_does_not_take_a_following_option() {
        for tokens in [&["--target", "--bogus"][..], &["-t", "-v"][..], &["-t", "--"][..]] {
            let result = parse_options(&deploy_metadata(), &args(tokens));
            assert_eq!(
                result,
                Err(CliError::InvalidOptionValue {
                    option: "--target".to_string(),
                    value: String::new(),
                    reason: "string value is required".to_string(),
                }),
                "{tokens:?}"
            );
        }
    }

    #[test]
    fn option_like_values_need_inline_form() {
        assert_eq!(parsed(&["--target=--literal"]).string("target"), Some("--literal"));
        assert_eq!(parsed(&["-t=-v"]).string("target"), Some("-v"));
        assert_eq!(parsed(&["-t", "-"]).string("target"), Some("-"));
        assert_eq!(parsed(&["-t", "x", "--retries", "-5"]).integer("retries"), Some(-5));
    }

    #[test]
    fn short_only_option_is_named_by_its_short_alias() {
        let mut registry = CommandRegistry::new("archme");
        registry
            .register(
                "run",
                |options| Ok(format!("{:?}", options.integer("count"))),
                vec![OptionSpec::integer("count").short('n').no_long().required()],
                "Run a batch",
            )
            .unwrap();

        let missing = registry.dispatch(&args(&["run"])).unwrap_err();
        assert_eq!(
            missing.to_string(),
            "Missing required option '-n' for command 'run'"
        );

        let invalid = registry.dispatch(&args(&["run", "-n", "x"])).unwrap_err();
        assert_eq!(
            invalid.to_string(),
            "Invalid value 'x' for option '-n': expected an integer"
        );

        match registry.dispatch(&args(&["run", "--help"])) {
            Ok(DispatchOutcome::Help(text)) => {
                assert!(text.contains("Usage: archme run -n <INTEGER> [OPTIONS]"));
            }
            other => panic!("Expected help, got {other:?}"),
        }

        assert!(registry.dispatch(&args(&["run", "-n", "-2"])).is_ok());
    }

    #[test]
    fn help_flag_short_circuits_validation() {
        let result = parse_options(&deploy_metadata(), &args(&["--bogus", "--help"]));
        assert_eq!(result, Ok(ParseOutcome::HelpRequested));
    }
}

mod help_text {
    use super::*;

    #[test]
    fn listing_is_plain_without_color() {
        let (registry, _) = recording_registry();
        let registry = registry.with_about("arch-me-later command line interface");

        let help = registry.render_help();

        assert!(help.starts_with("arch-me-later command line interface"));
        assert!(help.contains("Usage: archme <COMMAND> [OPTIONS]"));
        assert!(help.contains("  logs  Show application logs"));
        assert!(!help.contains('\x1b'));
    }

    #[test]
    fn listing_layout_is_exact() {
        let mut registry = CommandRegistry::new("archme").with_about("About");
        registry
            .register("tui", |_| Ok(String::new()), Vec::new(), "Launch")
            .unwrap();
        registry
            .register("logs", |_| Ok(String::new()), Vec::new(), "Logs")
            .unwrap();

        assert_eq!(
            registry.render_help(),
            "About\n\
             \n\
             Usage: archme <COMMAND> [OPTIONS]\n\
             \n\
             Commands:\n  \
             tui   Launch\n  \
             logs  Logs\n\
             \n\
             Run 'archme <COMMAND> --help' for more information on a command."
        );
    }

    #[test]
    fn listing_follows_registration_order() {
        let mut registry = CommandRegistry::new("archme");
        registry
            .register("tui", |_| Ok(String::new()), Vec::new(), "Launch")
            .unwrap();
        registry
            .register("logs", |_| Ok(String::new()), Vec::new(), "Logs")
            .unwrap();

        let help = registry.render_help();
        let tui = help.find("tui").unwrap();
        let logs = help.find("logs").unwrap();
        assert!(tui < logs);
    }

    #[test]
    fn command_usage_lists_required_options_and_defaults() {
        let mut registry = CommandRegistry::new("archme");
        let metadata = deploy_metadata();
        registry
            .register(
                &metadata.name,
                |_| Ok(String::new()),
                metadata.options.clone(),
                &metadata.description,
            )
            .unwrap();

        let help = match registry.dispatch(&args(&["deploy", "-h"])).unwrap() {
            DispatchOutcome::Help(text) => text,
            other => panic!("Expected help, got {other:?}"),
        };

        assert!(help.contains("Usage: archme deploy --target <STRING> [OPTIONS]"));
        assert!(help.contains("-t, --target <STRING>"));
        assert!(help.contains("[required]"));
        assert!(help.contains("[default: 3]"));
        assert!(help.contains("-h, --help"));
    }

    #[test]
    fn colored_listing_contains_escapes() {
        let (registry, _) = recording_registry();
        let registry = registry.with_styler(Styler::new(true));

        assert!(registry.render_help().contains('\x1b'));
    }

    #[test]
    fn styler_is_identity_when_disabled() {
        let styler = Styler::plain();
        assert_eq!(styler.error("Error"), "Error");
        assert_eq!(styler.command("logs"), "logs");
        assert!(Styler::new(true).error("Error").starts_with("\x1b[1m"));
    }

    #[test]
    fn padding_aligns_columns() {
        assert_eq!(padding("tui", 6), "   ");
        assert_eq!(padding("logs", 4), "");
        assert_eq!(padding("verylong", 4), "");
    }
}

mod suggestions {
    use super::*;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("logs", "logs"), 0);
        assert_eq!(edit_distance("lgs", "logs"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "tui"), 3);
    }

    #[test]
    fn ranks_nearest_first_and_limits_count() {
        let candidates = ["log", "logs", "login", "blog", "tui"];

        let suggestions = closest_names("logs", candidates);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0], "logs");
        assert!(!suggestions.contains(&"tui".to_string()));
    }

    #[test]
    fn prefix_matches_count_as_close() {
        let suggestions = closest_names("synchronize", ["sync", "tui"]);
        assert_eq!(suggestions, vec!["sync".to_string()]);
    }

    #[test]
    fn unrelated_input_has_no_suggestions() {
        assert!(closest_names("zzzzzz", ["logs", "tui"]).is_empty());
    }
}
