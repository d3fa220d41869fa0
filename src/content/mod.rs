//! Static page content.
//!
//! Everything the widgets read but never change: translations, asset
//! handles, the scenario table, the localized page sections and the
//! decorative motion table.

pub mod assets;
pub mod i18n;
pub mod motion;
pub mod page;
pub mod scenario;

pub use assets::{AssetRef, AssetResolver, StaticAssets};
pub use i18n::{decode, LocaleBundle, Localized, MessageCatalog, TranslationProvider};
pub use motion::{default_floating, ease_in_out, FloatMotion, Pose};
pub use page::{PageContent, PricingTier, SimulatorTexts};
pub use scenario::{load_scenarios, Color, Scenario, ScenarioSpec};
