//! Translation provider.
//!
//! Message catalogs are YAML trees addressed by dotted keys. A segment that
//! lands on a sequence is read as an index, so `showcase.scenarios.2.title`
//! reaches into a list. Values are opaque to the widgets: they only ever use
//! a string, a list's length and order, or a raw subtree to deserialize.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{LandingError, LandingResult};

/// Source of display strings by key.
pub trait TranslationProvider {
    /// Locale the provider answers for.
    fn locale(&self) -> &str;

    /// Raw value at `key`.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::MissingTranslation` if the key is absent.
    fn raw(&self, key: &str) -> LandingResult<Value>;

    /// Scalar value at `key` as display text.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a scalar.
    fn text(&self, key: &str) -> LandingResult<String> {
        scalar_text(&self.raw(key)?).ok_or_else(|| LandingError::TranslationShape {
            key: key.to_string(),
            expected: "a string",
        })
    }

    /// List of scalars at `key`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a list of scalars.
    fn list(&self, key: &str) -> LandingResult<Vec<String>> {
        let shape_err = || LandingError::TranslationShape {
            key: key.to_string(),
            expected: "a list of strings",
        };
        match self.raw(key)? {
            Value::Sequence(items) => items
                .iter()
                .map(|v| scalar_text(v).ok_or_else(shape_err))
                .collect(),
            _ => Err(shape_err()),
        }
    }
}

/// Deserialize the subtree at `key` into `T`.
///
/// # Errors
///
/// Returns an error if the key is absent or the subtree does not match `T`.
pub fn decode<T: DeserializeOwned>(provider: &dyn TranslationProvider, key: &str) -> LandingResult<T> {
    let value = provider.raw(key)?;
    serde_yaml::from_value(value).map_err(LandingError::from)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One locale's messages.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    root: Value,
}

impl MessageCatalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or its root is not a mapping.
    pub fn from_yaml(locale: impl Into<String>, yaml: &str) -> LandingResult<Self> {
        let locale = locale.into();
        let root: Value = serde_yaml::from_str(yaml)?;
        if !root.is_mapping() {
            return Err(LandingError::config(format!(
                "message catalog for '{locale}' must be a mapping"
            )));
        }
        Ok(Self { locale, root })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(locale: impl Into<String>, path: P) -> LandingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(locale, &content)
    }

    /// Look up a dotted key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Sequence(_) => segment.parse::<usize>().ok().and_then(|i| node.get(i)),
            _ => node.get(segment),
        })
    }
}

impl TranslationProvider for MessageCatalog {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn raw(&self, key: &str) -> LandingResult<Value> {
        self.lookup(key)
            .cloned()
            .ok_or_else(|| LandingError::missing_translation(&self.locale, key))
    }
}

/// All catalogs of a page plus the locale used for fallback.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    default_locale: String,
    catalogs: BTreeMap<String, MessageCatalog>,
}

impl LocaleBundle {
    /// Build a bundle.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::Config` if no catalog exists for `default_locale`.
    pub fn new(
        default_locale: impl Into<String>,
        catalogs: impl IntoIterator<Item = MessageCatalog>,
    ) -> LandingResult<Self> {
        let default_locale = default_locale.into();
        let catalogs: BTreeMap<String, MessageCatalog> = catalogs
            .into_iter()
            .map(|c| (c.locale.clone(), c))
            .collect();

        if !catalogs.contains_key(&default_locale) {
            return Err(LandingError::config(format!(
                "no message catalog for default locale '{default_locale}'"
            )));
        }

        Ok(Self {
            default_locale,
            catalogs,
        })
    }

    /// The fallback locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locales with a catalog, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Pick the best available locale for a request.
    ///
    /// Tries the exact tag, then its primary language subtag
    /// (`es-MX` -> `es`), then the default locale.
    #[must_use]
    pub fn negotiate(&self, requested: &str) -> &str {
        let requested = requested.trim();
        if let Some((key, _)) = self.catalogs.get_key_value(requested) {
            return key;
        }
        let primary = requested
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if let Some((key, _)) = self.catalogs.get_key_value(primary.as_str()) {
            return key;
        }
        &self.default_locale
    }

    /// Provider for a requested locale, falling back per key to the default.
    #[must_use]
    pub fn localize(&self, requested: &str) -> Localized<'_> {
        let locale = self.negotiate(requested);
        debug!(requested, locale, "locale negotiated");
        Localized {
            bundle: self,
            locale: locale.to_string(),
        }
    }

    fn catalog(&self, locale: &str) -> Option<&MessageCatalog> {
        self.catalogs.get(locale)
    }
}

/// A [`LocaleBundle`] viewed through one negotiated locale.
#[derive(Debug, Clone)]
pub struct Localized<'a> {
    bundle: &'a LocaleBundle,
    locale: String,
}

impl TranslationProvider for Localized<'_> {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn raw(&self, key: &str) -> LandingResult<Value> {
        let primary = self
            .bundle
            .catalog(&self.locale)
            .and_then(|c| c.lookup(key));
        if let Some(value) = primary {
            return Ok(value.clone());
        }

        let fallback = self
            .bundle
            .catalog(&self.bundle.default_locale)
            .and_then(|c| c.lookup(key));
        match fallback {
            Some(value) => {
                debug!(key, locale = %self.locale, "translation fell back to default locale");
                Ok(value.clone())
            }
            None => Err(LandingError::missing_translation(&self.locale, key)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const ES: &str = r#"
hero:
  title: "Tu historia, tu estilo"
  cta: "Empezar"
simulator:
  tags: ["Anime", "Retro", "Cyberpunk"]
  maxTags: 2
showcase:
  scenarios:
    - title: "Noche urbana"
      description: "Luces de neón"
    - title: "Playa"
      description: "Atardecer"
"#;

    const EN: &str = r#"
hero:
  title: "Your story, your style"
simulator:
  tags: ["Anime", "Retro"]
"#;

    fn bundle() -> LocaleBundle {
        LocaleBundle::new(
            "es",
            [
                MessageCatalog::from_yaml("es", ES).unwrap(),
                MessageCatalog::from_yaml("en", EN).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dotted_lookup() {
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        assert_eq!(catalog.text("hero.title").unwrap(), "Tu historia, tu estilo");
        assert_eq!(
            catalog.text("showcase.scenarios.1.title").unwrap(),
            "Playa"
        );
    }

    #[test]
    fn test_list_lookup_preserves_order() {
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        assert_eq!(
            catalog.list("simulator.tags").unwrap(),
            vec!["Anime", "Retro", "Cyberpunk"]
        );
    }

    #[test]
    fn test_numbers_render_as_text() {
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        assert_eq!(catalog.text("simulator.maxTags").unwrap(), "2");
    }

    #[test]
    fn test_missing_key() {
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        let err = catalog.text("footer.tagline").unwrap_err();
        assert!(matches!(err, LandingError::MissingTranslation { .. }));
        assert!(catalog.lookup("showcase.scenarios.9.title").is_none());
        assert!(catalog.lookup("showcase.scenarios.x").is_none());
    }

    #[test]
    fn test_shape_mismatch() {
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        assert!(matches!(
            catalog.text("simulator.tags"),
            Err(LandingError::TranslationShape { .. })
        ));
        assert!(matches!(
            catalog.list("hero.title"),
            Err(LandingError::TranslationShape { .. })
        ));
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert!(MessageCatalog::from_yaml("es", "- a\n- b\n").is_err());
    }

    #[test]
    fn test_decode_subtree() {
        #[derive(Deserialize)]
        struct Scenario {
            title: String,
            description: String,
        }
        let catalog = MessageCatalog::from_yaml("es", ES).unwrap();
        let items: Vec<Scenario> = decode(&catalog, "showcase.scenarios").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Noche urbana");
        assert_eq!(items[1].description, "Atardecer");
    }

    #[test]
    fn test_bundle_requires_default_catalog() {
        let err = LocaleBundle::new("fr", [MessageCatalog::from_yaml("es", ES).unwrap()]);
        assert!(err.is_err());
    }

    #[test]
    fn test_negotiation() {
        let bundle = bundle();
        assert_eq!(bundle.negotiate("en"), "en");
        assert_eq!(bundle.negotiate("en-US"), "en");
        assert_eq!(bundle.negotiate("EN_gb"), "en");
        assert_eq!(bundle.negotiate("de-DE"), "es");
        assert_eq!(bundle.negotiate(""), "es");
        assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["en", "es"]);
    }

    #[test]
    fn test_localized_substitution_and_fallback() {
        let bundle = bundle();
        let en = bundle.localize("en-US");
        assert_eq!(en.locale(), "en");
        assert_eq!(en.text("hero.title").unwrap(), "Your story, your style");
        // Missing in en, present in es.
        assert_eq!(en.text("hero.cta").unwrap(), "Empezar");
        assert_eq!(en.list("simulator.tags").unwrap().len(), 2);

        let err = en.text("pricing.title").unwrap_err();
        match err {
            LandingError::MissingTranslation { locale, key } => {
                assert_eq!(locale, "en");
                assert_eq!(key, "pricing.title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
