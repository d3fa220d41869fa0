//! Command-line front end.
//!
//! All logic lives here rather than in `main.rs` so it can be tested;
//! `main` only installs logging and calls [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_VERIFY_RUNS};
pub use commands::{run_cli, run_session, validate_config, verify_reproducibility};
pub use output::{
    failure_source, phase_label, print_failure, print_help, print_report, print_validation, print_verification, print_version,
};
