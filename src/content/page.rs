//! Localized static sections of the landing page.
//!
//! Everything here is read once at mount from the translation provider and
//! never changes. The interactive widgets take their strings from
//! [`ShowcaseTexts`] and [`SimulatorTexts`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::content::i18n::{decode, TranslationProvider};
use crate::error::LandingResult;

/// Age confirmation modal shown before the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGate {
    pub title: String,
    pub message: String,
    pub confirm: String,
    pub decline: String,
    pub disclaimer: String,
}

/// Hero banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub cta_secondary: String,
}

impl Hero {
    /// Title split at its first comma into a lead line and a highlighted
    /// remainder. Later commas stay in the remainder.
    #[must_use]
    pub fn headline(&self) -> (&str, Option<&str>) {
        match self.title.split_once(',') {
            Some((lead, rest)) => (lead, Some(rest.trim_start())),
            None => (&self.title, None),
        }
    }
}

/// Carousel header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowcaseTexts {
    pub title: String,
    pub subtitle: String,
}

/// One entry in the feature list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
}

/// Feature list section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Features {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureItem>,
    pub cta: String,
    pub cta_question: String,
}

/// Strings and canned outputs for the generation simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatorTexts {
    pub title: String,
    pub subtitle: String,
    /// Selectable style tags, in display order.
    pub tags: Vec<String>,
    pub generate: String,
    pub result: String,
    pub continue_story: String,
    pub generate_another: String,
    pub upload_photo: String,
    pub select_style: String,
    /// Prefix of the style summary appended to a result.
    pub applied_styles: String,
    /// Canned outputs standing in for a generation backend.
    pub results: Vec<String>,
}

/// A pricing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub price: String,
    pub currency: String,
    pub period: String,
    /// Badge text for the highlighted plan.
    #[serde(default)]
    pub popular: Option<String>,
    pub features: Vec<String>,
    pub cta: String,
}

/// Pricing section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pricing {
    pub title: String,
    pub subtitle: String,
    pub guarantee: String,
    /// Free plan first, then premium.
    pub tiers: Vec<PricingTier>,
}

impl Pricing {
    /// The plan carrying a "popular" badge, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&PricingTier> {
        self.tiers.iter().find(|t| t.popular.is_some())
    }
}

/// One customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Testimonials section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonials {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<Testimonial>,
}

/// Footer links and notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub tagline: String,
    pub privacy: String,
    pub terms: String,
    pub contact: String,
    pub copyright: String,
}

/// Every localized section of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
    pub locale: String,
    pub age_gate: AgeGate,
    pub hero: Hero,
    pub showcase: ShowcaseTexts,
    pub features: Features,
    pub simulator: SimulatorTexts,
    pub pricing: Pricing,
    pub testimonials: Testimonials,
    pub footer: Footer,
}

impl PageContent {
    /// Load all sections.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed translation.
    pub fn load(t: &dyn TranslationProvider) -> LandingResult<Self> {
        Ok(Self {
            locale: t.locale().to_string(),
            age_gate: AgeGate {
                title: t.text("ageVerification.title")?,
                message: t.text("ageVerification.message")?,
                confirm: t.text("ageVerification.confirm")?,
                decline: t.text("ageVerification.decline")?,
                disclaimer: t.text("ageVerification.disclaimer")?,
            },
            hero: Hero {
                title: t.text("hero.title")?,
                subtitle: t.text("hero.subtitle")?,
                cta: t.text("hero.cta")?,
                cta_secondary: t.text("hero.ctaSecondary")?,
            },
            showcase: ShowcaseTexts {
                title: t.text("showcase.title")?,
                subtitle: t.text("showcase.subtitle")?,
            },
            features: Features {
                title: t.text("features.title")?,
                subtitle: t.text("features.subtitle")?,
                items: decode(t, "features.items")?,
                cta: t.text("features.cta")?,
                cta_question: t.text("features.ctaQuestion")?,
            },
            simulator: SimulatorTexts::load(t)?,
            pricing: Pricing {
                title: t.text("pricing.title")?,
                subtitle: t.text("pricing.subtitle")?,
                guarantee: t.text("pricing.guarantee")?,
                tiers: vec![decode(t, "pricing.free")?, decode(t, "pricing.premium")?],
            },
            testimonials: Testimonials {
                title: t.text("testimonials.title")?,
                subtitle: t.text("testimonials.subtitle")?,
                items: decode(t, "testimonials.items")?,
            },
            footer: Footer {
                tagline: t.text("footer.tagline")?,
                privacy: t.text("footer.privacy")?,
                terms: t.text("footer.terms")?,
                contact: t.text("footer.contact")?,
                copyright: t.text("footer.copyright")?,
            },
        })
    }
}

impl SimulatorTexts {
    /// Load the simulator strings.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed translation.
    pub fn load(t: &dyn TranslationProvider) -> LandingResult<Self> {
        Ok(Self {
            title: t.text("simulator.title")?,
            subtitle: t.text("simulator.subtitle")?,
            tags: t.list("simulator.tags")?,
            generate: t.text("simulator.generate")?,
            result: t.text("simulator.result")?,
            continue_story: t.text("simulator.continueStory")?,
            generate_another: t.text("simulator.generateAnother")?,
            upload_photo: t.text("simulator.uploadPhoto")?,
            select_style: t.text("simulator.selectStyle")?,
            applied_styles: t.text("simulator.appliedStyles")?,
            results: t.list("simulator.results")?,
        })
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a price, got {other:?}"))),
    }
}
