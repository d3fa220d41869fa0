//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use crate::session::{RunOptions, Session};

use super::output::{
    print_failure, print_help, print_report, print_validation, print_verification, print_version,
};
use super::{Args, Command};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            seed_override,
            locale,
            until_ms,
            verbose,
        } => {
            let options = RunOptions {
                seed: seed_override,
                locale,
                until_ms,
            };
            run_session(&config_path, &options, verbose)
        }
        Command::Verify { config_path, runs } => verify_reproducibility(&config_path, runs),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Replay a configuration's script and print the timeline.
#[must_use]
pub fn run_session(path: &Path, options: &RunOptions, verbose: bool) -> ExitCode {
    println!("Running: {}\n", path.display());

    let result = Session::load(path).and_then(|session| session.run(options));
    match result {
        Ok(report) => {
            print_report(&report, verbose);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Run a configuration several times and compare timelines.
#[must_use]
pub fn verify_reproducibility(path: &Path, runs: usize) -> ExitCode {
    println!("Verifying: {}\n", path.display());

    let result = Session::load(path)
        .and_then(|session| session.verify_reproducibility(runs, &RunOptions::default()));
    match result {
        Ok(report) => {
            print_verification(&report);
            if report.is_reproducible() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load a configuration and its catalogs, then mount once in every locale.
#[must_use]
pub fn validate_config(path: &Path) -> ExitCode {
    println!("Validating: {}\n", path.display());

    let session = match Session::load(path) {
        Ok(session) => session,
        Err(e) => {
            print_failure("Validation FAILED", &e);
            return ExitCode::from(1);
        }
    };

    let locales: Vec<&str> = session.bundle().locales().collect();
    for locale in &locales {
        let options = RunOptions {
            locale: Some((*locale).to_string()),
            ..RunOptions::default()
        };
        if let Err(e) = session.mount(&options) {
            print_failure(&format!("Validation FAILED for locale '{locale}'"), &e);
            return ExitCode::from(1);
        }
    }

    print_validation(session.config(), &locales);
    ExitCode::SUCCESS
}
