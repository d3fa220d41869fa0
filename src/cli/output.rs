//! CLI output formatting.
//!
//! Kept apart from the command handlers so every printer can be exercised
//! from tests without touching the filesystem.

use crate::config::{LandingConfig, SimulatorVariant};
use crate::error::LandingError;
use crate::session::{ReproducibilityReport, SessionReport};
use crate::widgets::simulator::PhaseView;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    let version = option_env!("LANDING_SIM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    match option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
        Some(hash) => println!("landing-sim {version} ({hash})"),
        None => println!("landing-sim {version}"),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"landing-sim - Deterministic interaction core for the landing page

USAGE:
    landing-sim <COMMAND> [OPTIONS]

COMMANDS:
    run <landing.yaml>          Replay the scripted intents headlessly
        --seed <N>              Override the configured seed
        --locale <L>            Render with locale L (falls back to the default)
        --until-ms <N>          Stop at virtual time N (default: last step + 10s)
        -v, --verbose           Print every timeline event

    verify <landing.yaml>       Check that repeated runs are identical
        --runs <N>              Number of runs (default: 3)

    validate <landing.yaml>     Load and validate config and message catalogs

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    landing-sim run configs/landing.yaml
    landing-sim run configs/landing.yaml --seed 7 --locale en -v
    landing-sim verify configs/landing.yaml --runs 5

Logging is controlled with RUST_LOG (default: warn).
"
    );
}

/// Which part of the inputs an error points at.
#[must_use]
pub const fn failure_source(error: &LandingError) -> &'static str {
    if error.is_content_error() {
        "content"
    } else {
        "configuration"
    }
}

/// Print a load or mount failure with its source.
pub fn print_failure(heading: &str, error: &LandingError) {
    println!("✗ {heading} ({} error)", failure_source(error));
    eprintln!("  {error}");
}

/// One-line label for a simulator phase.
#[must_use]
pub fn phase_label(phase: &PhaseView) -> String {
    match phase {
        PhaseView::Idle => "idle".to_string(),
        PhaseView::Pending {
            started_at_ms,
            completes_at_ms,
        } => format!("pending ({started_at_ms} ms -> {completes_at_ms} ms)"),
        PhaseView::Completed { output } => {
            let first = output.lines().next().unwrap_or_default();
            format!("completed: {first}")
        }
    }
}

/// Print a session report.
pub fn print_report(report: &SessionReport, verbose: bool) {
    println!("{RULE}");
    println!("Seed:    {}", report.seed);
    println!("Locale:  {}", report.locale);
    println!("Horizon: {} ms", report.horizon_ms);
    println!("{RULE}\n");

    println!("Timeline:");
    println!("  Events:   {}", report.events.len());
    println!("  Rejected: {}", report.rejected);

    if verbose {
        println!();
        for event in &report.events {
            let sym = if event.outcome.is_applied() { "✓" } else { "✗" };
            print!(
                "  {sym} #{:<4} {:>7} ms  {:<9} {:<22} {}",
                event.sequence, event.at_ms, event.widget, event.action, event.outcome
            );
            if event.detail.is_empty() {
                println!();
            } else {
                println!("  [{}]", event.detail);
            }
        }
    }

    let snapshot = &report.final_snapshot;
    println!("\nFinal page:");
    println!(
        "  Carousel:  slide {}/{} \"{}\" ({:?})",
        snapshot.carousel.slide_label,
        snapshot.carousel.total,
        snapshot.carousel.scenario.title,
        snapshot.carousel.direction
    );
    println!("  Simulator: {}", phase_label(&snapshot.simulator.phase));
    if let Some(summary) = &snapshot.simulator.selection_summary {
        println!("  Selection: {summary}");
    }
    println!("  Timers:    {}", snapshot.pending_timers);

    println!("\nChecksum (blake3): {}", report.checksum);
    println!("{RULE}\n");
}

/// Print a reproducibility report.
pub fn print_verification(report: &ReproducibilityReport) {
    println!("{RULE}");
    println!("Reproducibility: {} runs, seed {}", report.runs, report.seed);
    println!("{RULE}\n");
    println!("  Reference checksum: {}", report.reference_checksum);
    match report.first_mismatch {
        None => println!("\n✓ All {} timelines identical", report.runs),
        Some(run) => println!("\n✗ Run {run} diverged from run 0"),
    }
    println!();
}

/// Print a summary of a configuration that passed validation.
pub fn print_validation(config: &LandingConfig, locales: &[&str]) {
    let variant = match config.simulator.variant {
        SimulatorVariant::Tags => "tags",
        SimulatorVariant::Prompt => "prompt",
    };
    println!("{RULE}");
    println!("✓ Configuration valid");
    println!("{RULE}\n");
    println!("  Seed:           {}", config.seed);
    println!(
        "  Locales:        {} (default {})",
        locales.join(", "),
        config.default_locale
    );
    println!("  Scenarios:      {}", config.carousel.scenarios.len());
    println!(
        "  Autoplay:       {} every {} ms",
        if config.carousel.autoplay { "on" } else { "off" },
        config.carousel.autoplay_interval_ms
    );
    println!(
        "  Simulator:      {variant}, up to {} tags, {}..={} ms",
        config.simulator.max_tags, config.simulator.latency.min_ms, config.simulator.latency.max_ms
    );
    println!("  Floating:       {}", config.floating.len());
    println!(
        "  Script steps:   {} (ends at {} ms)",
        config.script.len(),
        config.script_end_ms()
    );
    println!();
}
