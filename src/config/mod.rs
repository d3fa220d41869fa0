//! Configuration system with YAML schema and validation.
//!
//! Mistakes are caught before anything mounts:
//! - Type-safe configuration structs with `deny_unknown_fields`
//! - Field constraints via `validator`
//! - A semantic pass for rules that span fields

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::content::motion::{default_floating, FloatMotion};
use crate::content::scenario::{Color, ScenarioSpec};
use crate::error::{LandingError, LandingResult};
use crate::widgets::Intent;

/// Top-level page configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LandingConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Master seed for canned-output choice and optional latency jitter.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Locale used when a request matches no catalog, and for per-key fallback.
    #[validate(length(min = 1))]
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Message catalog file per locale, relative to the config file.
    #[serde(default = "default_locales")]
    pub locales: BTreeMap<String, PathBuf>,

    /// Asset resolution.
    #[validate(nested)]
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Showcase carousel.
    #[validate(nested)]
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Generation simulator.
    #[validate(nested)]
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Decorative floating images.
    #[validate(nested)]
    #[serde(default = "default_floating")]
    pub floating: Vec<FloatMotion>,

    /// Timed intents replayed by a headless session.
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_seed() -> u64 {
    42
}

fn default_locale() -> String {
    "es".to_string()
}

fn default_locales() -> BTreeMap<String, PathBuf> {
    ["es", "en"]
        .into_iter()
        .map(|l| (l.to_string(), PathBuf::from(format!("locales/{l}.yaml"))))
        .collect()
}

impl LandingConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> LandingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> LandingResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> LandingResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> LandingConfigBuilder {
        LandingConfigBuilder::default()
    }

    /// Validate constraints that span fields.
    fn validate_semantic(&self) -> LandingResult<()> {
        if self.carousel.scenarios.is_empty() {
            return Err(LandingError::EmptyCarousel);
        }

        if !self.locales.contains_key(&self.default_locale) {
            return Err(LandingError::config(format!(
                "default locale '{}' has no message file",
                self.default_locale
            )));
        }

        let latency = &self.simulator.latency;
        if latency.min_ms > latency.max_ms {
            return Err(LandingError::config(format!(
                "simulator latency min ({} ms) exceeds max ({} ms)",
                latency.min_ms, latency.max_ms
            )));
        }

        if let Some(pair) = self.script.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            return Err(LandingError::config(format!(
                "script steps must be in time order: {} ms follows {} ms",
                pair[1].at_ms, pair[0].at_ms
            )));
        }

        Ok(())
    }

    /// Time of the last scripted intent.
    #[must_use]
    pub fn script_end_ms(&self) -> u64 {
        self.script.last().map_or(0, |s| s.at_ms)
    }
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            seed: default_seed(),
            default_locale: default_locale(),
            locales: default_locales(),
            assets: AssetsConfig::default(),
            carousel: CarouselConfig::default(),
            simulator: SimulatorConfig::default(),
            floating: default_floating(),
            script: Vec::new(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct LandingConfigBuilder {
    seed: Option<u64>,
    default_locale: Option<String>,
    autoplay_interval_ms: Option<u64>,
    autoplay: Option<bool>,
    scenarios: Option<Vec<ScenarioSpec>>,
    variant: Option<SimulatorVariant>,
    latency: Option<LatencyConfig>,
    script: Vec<ScriptStep>,
}

impl LandingConfigBuilder {
    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default locale.
    #[must_use]
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Set the carousel autoplay interval.
    #[must_use]
    pub const fn autoplay_interval_ms(mut self, ms: u64) -> Self {
        self.autoplay_interval_ms = Some(ms);
        self
    }

    /// Enable or disable carousel autoplay.
    #[must_use]
    pub const fn autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = Some(enabled);
        self
    }

    /// Replace the scenario table.
    #[must_use]
    pub fn scenarios(mut self, scenarios: Vec<ScenarioSpec>) -> Self {
        self.scenarios = Some(scenarios);
        self
    }

    /// Set the simulator input variant.
    #[must_use]
    pub const fn variant(mut self, variant: SimulatorVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the simulated generation latency range.
    #[must_use]
    pub const fn latency_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency = Some(LatencyConfig { min_ms, max_ms });
        self
    }

    /// Append a scripted intent.
    #[must_use]
    pub fn step(mut self, at_ms: u64, intent: Intent) -> Self {
        self.script.push(ScriptStep { at_ms, intent });
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> LandingConfig {
        let mut config = LandingConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(locale) = self.default_locale {
            config.default_locale = locale;
        }
        if let Some(ms) = self.autoplay_interval_ms {
            config.carousel.autoplay_interval_ms = ms;
        }
        if let Some(enabled) = self.autoplay {
            config.carousel.autoplay = enabled;
        }
        if let Some(scenarios) = self.scenarios {
            config.carousel.scenarios = scenarios;
        }
        if let Some(variant) = self.variant {
            config.simulator.variant = variant;
        }
        if let Some(latency) = self.latency {
            config.simulator.latency = latency;
        }
        config.script = self.script;

        config
    }
}

/// Asset resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Prefix prepended to every asset path.
    #[serde(default)]
    pub base_url: String,
    /// Known asset paths. Empty accepts any path.
    #[serde(default)]
    pub manifest: Vec<String>,
}

/// Showcase carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CarouselConfig {
    /// Whether the autoplay timer runs.
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Autoplay period.
    #[validate(range(min = 1))]
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// Translation key prefix of the scenario texts.
    #[validate(length(min = 1))]
    #[serde(default = "default_translation_prefix")]
    pub translation_prefix: String,
    /// Slides in traversal order.
    #[validate(nested)]
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioSpec>,
}

const fn default_true() -> bool {
    true
}

const fn default_autoplay_interval_ms() -> u64 {
    5000
}

fn default_translation_prefix() -> String {
    "showcase.scenarios".to_string()
}

fn default_scenarios() -> Vec<ScenarioSpec> {
    [
        (0x83_18_43, 0xec_48_99),
        (0xec_48_99, 0xf4_72_b6),
        (0x1e_29_3b, 0x06_b6_d4),
        (0x4c_1d_95, 0x8b_5c_f6),
        (0x7c_2d_12, 0xf9_73_16),
        (0x1e_3a_8a, 0x3b_82_f6),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (theme, accent))| ScenarioSpec {
        image: format!("/images/showcase/Escena{}.png", i + 1),
        theme_color: Color::from_rgb(theme),
        accent_color: Color::from_rgb(accent),
    })
    .collect()
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_interval_ms: default_autoplay_interval_ms(),
            translation_prefix: default_translation_prefix(),
            scenarios: default_scenarios(),
        }
    }
}

/// Which input the simulator asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorVariant {
    /// Photo upload plus up to `max_tags` style tags.
    #[default]
    Tags,
    /// Free-text prompt.
    Prompt,
}

/// Generation simulator settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Input variant.
    #[serde(default)]
    pub variant: SimulatorVariant,
    /// Tag selection capacity.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    /// Simulated generation latency.
    #[validate(nested)]
    #[serde(default)]
    pub latency: LatencyConfig,
}

const fn default_max_tags() -> usize {
    2
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            variant: SimulatorVariant::default(),
            max_tags: default_max_tags(),
            latency: LatencyConfig::default(),
        }
    }
}

/// Fixed delay of the generation stub.
const DEFAULT_LATENCY_MS: u64 = 2500;

/// Inclusive latency range; each generation draws one value from it.
///
/// Defaults to a fixed 2500 ms. A wider range opts into seeded jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LatencyConfig {
    #[validate(range(min = 1))]
    pub min_ms: u64,
    #[validate(range(min = 1))]
    pub max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_LATENCY_MS,
            max_ms: DEFAULT_LATENCY_MS,
        }
    }
}

/// One scripted intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Virtual time of delivery.
    pub at_ms: u64,
    /// What the user does.
    #[serde(flatten)]
    pub intent: Intent,
}
