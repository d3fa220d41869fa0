//! landing-sim CLI
//!
//! Headless runner for landing page sessions.

use std::process::ExitCode;

use landing_sim::cli::{run_cli, Args};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.command.is_verbose() {
        "landing_sim=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run_cli(args)
}
