//! Showcase scenarios.
//!
//! A scenario is one carousel slide. Its text comes from the translation
//! provider, its image from the asset resolver and its colors from the
//! scenario table in the configuration. Order in the table is traversal
//! order.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::content::assets::{AssetRef, AssetResolver};
use crate::content::i18n::TranslationProvider;
use crate::error::{LandingError, LandingResult};

/// Opaque RGB color, written `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Parse `#rrggbb` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `LandingError::InvalidColor` for anything else.
    pub fn parse(value: &str) -> LandingResult<Self> {
        let invalid = || LandingError::InvalidColor(value.to_string());
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(hex, 16).map(Self).map_err(|_| invalid())
    }

    /// Construct from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Color with an alpha channel, as `#rrggbbaa`.
    #[must_use]
    pub fn with_alpha(self, alpha: u8) -> String {
        format!("{self}{alpha:02x}")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = LandingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Static per-slide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Image path handed to the asset resolver.
    #[validate(length(min = 1))]
    pub image: String,
    /// Background theme color.
    pub theme_color: Color,
    /// Accent color for title, border and glow.
    pub accent_color: Color,
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// 1-based identifier.
    pub id: u32,
    /// Localized title.
    pub title: String,
    /// Localized description.
    pub description: String,
    /// Slide image.
    pub image: AssetRef,
    /// Background theme color.
    pub theme_color: Color,
    /// Accent color.
    pub accent_color: Color,
}

impl Scenario {
    /// Background gradient stops (theme then accent), with the translucency
    /// the slide backdrop uses.
    #[must_use]
    pub fn backdrop(&self) -> (String, String) {
        (
            self.theme_color.with_alpha(0x90),
            self.accent_color.with_alpha(0x60),
        )
    }
}

/// Build the scenario list from the table, translations and assets.
///
/// Entry `i` of the table takes its text from `{prefix}.{i}.title` and
/// `{prefix}.{i}.description`.
///
/// # Errors
///
/// Returns an error if a translation or asset is missing.
pub fn load_scenarios(
    specs: &[ScenarioSpec],
    prefix: &str,
    translations: &dyn TranslationProvider,
    assets: &dyn AssetResolver,
) -> LandingResult<Vec<Scenario>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let id = u32::try_from(i + 1)
                .map_err(|_| LandingError::config("too many scenarios"))?;
            Ok(Scenario {
                id,
                title: translations.text(&format!("{prefix}.{i}.title"))?,
                description: translations.text(&format!("{prefix}.{i}.description"))?,
                image: assets.resolve(&spec.image)?,
                theme_color: spec.theme_color,
                accent_color: spec.accent_color,
            })
        })
        .collect()
}
