//! Headless sessions.
//!
//! A session owns a validated configuration together with its message
//! catalogs and asset resolver, and can mount any number of independent
//! stages from them. Running a session replays the configured script to a
//! horizon and reports the resulting timeline.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::LandingConfig;
use crate::content::assets::StaticAssets;
use crate::content::i18n::{LocaleBundle, MessageCatalog};
use crate::engine::SimTime;
use crate::error::{LandingError, LandingResult};
use crate::stage::{PageSnapshot, Stage, StageEvent};

/// Idle time appended after the last scripted intent when no horizon is given.
pub const DEFAULT_TAIL_MS: u64 = 10_000;

/// Per-run overrides.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replaces the configured seed.
    pub seed: Option<u64>,
    /// Requested locale; negotiated against the available catalogs.
    pub locale: Option<String>,
    /// Horizon. Defaults to the last script step plus [`DEFAULT_TAIL_MS`].
    pub until_ms: Option<u64>,
}

/// Result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub locale: String,
    pub horizon_ms: u64,
    pub events: Vec<StageEvent>,
    pub rejected: usize,
    /// BLAKE3 digest of `events`.
    pub checksum: String,
    /// Page state at the horizon, before unmount.
    pub final_snapshot: PageSnapshot,
}

/// Outcome of running the same session several times.
#[derive(Debug, Clone, Serialize)]
pub struct ReproducibilityReport {
    pub runs: usize,
    pub seed: u64,
    pub reference_checksum: String,
    /// Index of the first run whose timeline differs from run 0.
    pub first_mismatch: Option<usize>,
}

impl ReproducibilityReport {
    #[must_use]
    pub const fn is_reproducible(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// Configuration plus loaded content.
#[derive(Debug, Clone)]
pub struct Session {
    config: LandingConfig,
    bundle: LocaleBundle,
    assets: StaticAssets,
}

impl Session {
    /// Load a configuration file and the message catalogs it names.
    ///
    /// Catalog paths are resolved relative to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is unreadable or invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> LandingResult<Self> {
        let path = path.as_ref();
        let config = LandingConfig::load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let catalogs = config
            .locales
            .iter()
            .map(|(locale, file)| MessageCatalog::load(locale.clone(), base.join(file)))
            .collect::<LandingResult<Vec<_>>>()?;
        let bundle = LocaleBundle::new(config.default_locale.clone(), catalogs)?;

        info!(
            path = %path.display(),
            locales = config.locales.len(),
            script_steps = config.script.len(),
            "session loaded"
        );
        Self::from_parts(config, bundle)
    }

    /// Assemble from an in-memory configuration and catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_parts(config: LandingConfig, bundle: LocaleBundle) -> LandingResult<Self> {
        config.check()?;
        let assets = StaticAssets::from_config(&config.assets);
        Ok(Self {
            config,
            bundle,
            assets,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &LandingConfig {
        &self.config
    }

    #[must_use]
    pub const fn bundle(&self) -> &LocaleBundle {
        &self.bundle
    }

    /// Mount a fresh stage.
    ///
    /// # Errors
    ///
    /// Returns an error if content for the locale is incomplete.
    pub fn mount(&self, options: &RunOptions) -> LandingResult<Stage> {
        let config = match options.seed {
            Some(seed) => {
                let mut config = self.config.clone();
                config.seed = seed;
                std::borrow::Cow::Owned(config)
            }
            None => std::borrow::Cow::Borrowed(&self.config),
        };
        let locale = options
            .locale
            .as_deref()
            .unwrap_or(&self.config.default_locale);
        Stage::mount(&config, &self.bundle, locale, &self.assets)
    }

    /// Replay the script to the horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if mounting fails.
    pub fn run(&self, options: &RunOptions) -> LandingResult<SessionReport> {
        let horizon_ms = options
            .until_ms
            .unwrap_or_else(|| self.config.script_end_ms().saturating_add(DEFAULT_TAIL_MS));

        let mut stage = self.mount(options)?;
        stage.run_script(&self.config.script, SimTime::from_millis(horizon_ms));
        let final_snapshot = stage.snapshot();
        let seed = stage.seed();
        let locale = stage.page().locale.clone();
        let timeline = stage.into_timeline();

        let report = SessionReport {
            seed,
            locale,
            horizon_ms,
            rejected: timeline.rejected_count(),
            checksum: timeline.checksum()?,
            events: timeline.events().to_vec(),
            final_snapshot,
        };
        info!(
            seed,
            horizon_ms,
            events = report.events.len(),
            rejected = report.rejected,
            checksum = %report.checksum,
            "session finished"
        );
        Ok(report)
    }

    /// Run `runs` times with the same options and compare timelines.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::Config` for zero runs, or any run error.
    pub fn verify_reproducibility(
        &self,
        runs: usize,
        options: &RunOptions,
    ) -> LandingResult<ReproducibilityReport> {
        if runs == 0 {
            return Err(LandingError::config("at least one run is required"));
        }

        let reference = self.run(options)?;
        let mut first_mismatch = None;
        for i in 1..runs {
            let report = self.run(options)?;
            if report.checksum != reference.checksum || report.events != reference.events {
                warn!(run = i, "timeline differs from reference run");
                first_mismatch = Some(i);
                break;
            }
        }

        Ok(ReproducibilityReport {
            runs,
            seed: reference.seed,
            reference_checksum: reference.checksum,
            first_mismatch,
        })
    }
}
