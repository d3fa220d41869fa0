//! CLI argument parsing.
//!
//! Hand-rolled so it can be driven from any iterator of strings in tests.

use std::path::PathBuf;

/// Default number of runs for `verify`.
pub const DEFAULT_VERIFY_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replay a landing configuration headlessly.
    Run {
        /// Path to the landing YAML file.
        config_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Requested locale.
        locale: Option<String>,
        /// Horizon in virtual milliseconds.
        until_ms: Option<u64>,
        /// Print every timeline event.
        verbose: bool,
    },
    /// Check that repeated runs produce identical timelines.
    Verify {
        /// Path to the landing YAML file.
        config_path: PathBuf,
        /// Number of runs.
        runs: usize,
    },
    /// Load and validate a configuration and its catalogs.
    Validate {
        /// Path to the landing YAML file.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Command {
    /// Whether verbose logging was requested.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        matches!(self, Self::Run { verbose: true, .. })
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        let Some(first) = args.get(1) else {
            return Self {
                command: Command::Help,
            };
        };

        let command = match first.as_str() {
            "run" => Self::parse_run_command(args),
            "verify" => Self::parse_verify_command(args),
            "validate" => Self::parse_validate_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        let Some(path) = args.get(2) else {
            eprintln!("Error: 'run' command requires a config path");
            return Command::Help;
        };

        let mut seed_override = None;
        let mut locale = None;
        let mut until_ms = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    seed_override = parse_value(args, i, "--seed").or(seed_override);
                    i += 2;
                }
                "--locale" => {
                    if let Some(value) = args.get(i + 1) {
                        locale = Some(value.clone());
                    }
                    i += 2;
                }
                "--until-ms" => {
                    until_ms = parse_value(args, i, "--until-ms").or(until_ms);
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                other => {
                    eprintln!("Warning: ignoring argument '{other}'");
                    i += 1;
                }
            }
        }

        Command::Run {
            config_path: PathBuf::from(path),
            seed_override,
            locale,
            until_ms,
            verbose,
        }
    }

    fn parse_verify_command(args: &[String]) -> Command {
        let Some(path) = args.get(2) else {
            eprintln!("Error: 'verify' command requires a config path");
            return Command::Help;
        };

        let mut runs = DEFAULT_VERIFY_RUNS;
        if args.get(3).map(String::as_str) == Some("--runs") {
            if let Some(n) = parse_value(args, 3, "--runs") {
                runs = n;
            }
        }

        Command::Verify {
            config_path: PathBuf::from(path),
            runs,
        }
    }

    fn parse_validate_command(args: &[String]) -> Command {
        args.get(2).map_or_else(
            || {
                eprintln!("Error: 'validate' command requires a config path");
                Command::Help
            },
            |path| Command::Validate {
                config_path: PathBuf::from(path),
            },
        )
    }
}

/// Parse the value following the flag at `i`, warning when it is absent or malformed.
fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Option<T> {
    match args.get(i + 1) {
        Some(raw) => raw.parse().map_or_else(
            |_| {
                eprintln!("Warning: invalid value '{raw}' for {flag}");
                None
            },
            Some,
        ),
        None => {
            eprintln!("Warning: {flag} requires a value");
            None
        }
    }
}
