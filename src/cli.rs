//! Command-line front end
//!
//! Plays the host: reads resources from the editor data directory and
//! prints the command's notice instead of showing it in a status bar.

use anyhow::{Context, Result};
use std::process::ExitCode;

use crate::command::{CommandReport, SetDefaultSyntaxDialect, SetDialectArgs, Severity};
use crate::config::{Action, Config};
use crate::dialects::{DialectCandidate, list_dialects};
use crate::host::LogHost;
use crate::store::PackageStore;

/// Parse arguments, set up logging and run the requested action
pub fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    execute(&config)
}

/// Run the action in `config`
pub fn execute(config: &Config) -> Result<ExitCode> {
    let store = PackageStore::new(&config.data_dir);
    log::debug!("Using editor data directory {:?}", store.data_dir());

    match &config.action {
        Action::Set {
            syntax_file,
            dialect_file,
        } => {
            let args = SetDialectArgs {
                syntax_file: syntax_file.clone(),
                dialect_file: dialect_file.clone(),
            };
            let report = SetDefaultSyntaxDialect::new(store, LogHost).run(&args);
            print_report(&report);

            Ok(if report.notice.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Action::List { syntax_file, json } => {
            let candidates = list_dialects(&store, syntax_file)
                .with_context(|| format!("listing dialects for {syntax_file}"))?;

            if *json {
                let text = serde_json::to_string_pretty(&candidates)
                    .context("serializing dialect list")?;
                println!("{text}");
            } else {
                print_candidates(&candidates);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_report(report: &CommandReport) {
    match report.notice.severity {
        Severity::Info => println!("{}", report.notice.message),
        Severity::Warning => eprintln!("warning: {}", report.notice.message),
        Severity::Error => eprintln!("error: {}", report.notice.message),
    }
    print_candidates(&report.candidates);
}

fn print_candidates(candidates: &[DialectCandidate]) {
    for candidate in candidates {
        let mark = if candidate.selected { "✓" } else { " " };
        println!("{mark} {:<24} {}", candidate.name, candidate.path);
    }
}
