use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{debug, Level};

use nexus_check::parsing;
use nexus_check::validation::{self, Severity};

mod editor;
mod problem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Native,
    Concise,
    Json,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("nexus-check")
        .version(VERSION)
        .propagate_version(true)
        .about("Validate NEXUS phylogenetic data files.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more detail to standard error; repeat for more."),
        )
        .subcommand(
            Command::new("check")
                .about("Check bracket balance and the declared counts against the MATRIX block")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(["native", "concise", "json"])
                        .default_value("native")
                        .action(ArgAction::Set)
                        .help("Which kind of diagnostic output to print."),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .action(ArgAction::SetTrue)
                        .help("Also print the declared and actual taxa and character counts."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("The NEXUS file(s) to check, or '-' to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("language-server")
                .about("Run a Language Server Protocol server on standard input and output"),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let output = match submatches
                .get_one::<String>("output")
                .map(String::as_str)
            {
                Some("concise") => Output::Concise,
                Some("json") => Output::Json,
                _ => Output::Native,
            };
            let summary = submatches.get_flag("summary");

            let filenames: Vec<&String> = submatches
                .get_many::<String>("filename")
                .map(|values| values.collect())
                .unwrap_or_default();

            let mut failed = false;
            for filename in filenames {
                failed |= !check(Path::new(filename), output, summary);
            }

            std::process::exit(if failed { 1 } else { 0 });
        }
        Some(("language-server", _)) => {
            editor::run_language_server();
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: nexus-check [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Validate one file and print its diagnostics. Returns false if the file
/// could not be read or has errors.
fn check(filename: &Path, output: Output, summary: bool) -> bool {
    debug!("Checking {}", filename.display());

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return false;
        }
    };

    let report = validation::check(&content);

    match output {
        Output::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("{}: {}", "error".bright_red(), error);
                return false;
            }
        },
        Output::Native => {
            for diagnostic in &report.diagnostics {
                eprintln!(
                    "{}\n",
                    problem::full_diagnostic(diagnostic, filename, &content)
                );
            }
        }
        Output::Concise => {
            for diagnostic in &report.diagnostics {
                eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
            }
        }
    }

    if summary && output != Output::Json {
        println!(
            "{}: {} ({} error{}, {} warning{})",
            filename.display(),
            report.statistics,
            report.count(Severity::Error),
            if report.count(Severity::Error) == 1 { "" } else { "s" },
            report.count(Severity::Warning),
            if report.count(Severity::Warning) == 1 { "" } else { "s" },
        );
    }

    !report.has_errors()
}
