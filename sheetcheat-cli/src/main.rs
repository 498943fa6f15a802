//! Command-line interface for sheetcheat
//! This binary normalizes generated LaTeX cheat sheets and publishes them as LaTeX, a
//! Markdown preview or a PDF.
//!
//! Usage:
//!   sheetcheat build [`<input>`] --topic `<topic>` [--to `<format>`] [-o `<file>` | --out-dir `<dir>`]
//!   sheetcheat slug `<topic>` [--json]                  - Print the slug and artifact names
//!   sheetcheat formats                                - List the output formats
//!   sheetcheat rename [`<dir>`]                         - Title-case file and directory names

mod commands;
mod logging;

use clap::{Arg, ArgAction, ArgMatches, Command};
use commands::{BuildArgs, CliError};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("sheetcheat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Normalize generated LaTeX cheat sheets and convert them to display formats")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Diagnostics verbosity: trace, debug, info, warn or error")
                .default_value(logging::DEFAULT_LEVEL),
        )
        .subcommand(
            Command::new("build")
                .about("Normalize a generated response and publish it")
                .arg(
                    Arg::new("input")
                        .help("Response file; '-' or nothing reads stdin")
                        .index(1),
                )
                .arg(
                    Arg::new("topic")
                        .long("topic")
                        .short('t')
                        .help("Topic used in the title and the artifact names")
                        .default_value(""),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (see `sheetcheat formats`)")
                        .default_value("latex"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the artifact to this file")
                        .conflicts_with("out-dir"),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .help("Write the artifact into this directory under its canonical name"),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("no-math")
                        .long("no-math")
                        .help("Skip the math repairs")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("slug")
                .about("Print the slug and artifact names of a topic")
                .arg(Arg::new("topic").help("Topic").required(true).index(1))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(config_arg()),
        )
        .subcommand(Command::new("formats").about("List the available output formats"))
        .subcommand(
            Command::new("rename")
                .about("Title-case every file and directory name containing spaces")
                .arg(
                    Arg::new("dir")
                        .help("Directory to walk")
                        .index(1)
                        .default_value("."),
                ),
        )
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in configuration")
}

fn main() {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(logging::DEFAULT_LEVEL);
    let _logger = match logging::init_logging(level) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(commands::EXIT_FAILURE);
        }
    };

    let result = match matches.subcommand() {
        Some(("build", sub)) => commands::build(&build_args(sub)),
        Some(("slug", sub)) => commands::slug(
            sub.get_one::<String>("topic").map_or("", String::as_str),
            sub.get_flag("json"),
            sub.get_one::<String>("config").map(PathBuf::from).as_deref(),
        ),
        Some(("formats", _)) => commands::formats(),
        Some(("rename", sub)) => commands::rename(
            sub.get_one::<String>("dir")
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .as_path(),
        ),
        _ => Err(CliError::Usage("unknown command".to_string())),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn build_args(matches: &ArgMatches) -> BuildArgs {
    let path = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);
    BuildArgs {
        input: path("input"),
        topic: matches
            .get_one::<String>("topic")
            .cloned()
            .unwrap_or_default(),
        format: matches
            .get_one::<String>("to")
            .cloned()
            .unwrap_or_else(|| "latex".to_string()),
        output: path("output"),
        out_dir: path("out-dir"),
        config: path("config"),
        no_math: matches.get_flag("no-math"),
    }
}
