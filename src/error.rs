//! Error types for landing-sim.
//!
//! Errors only arise while loading and constructing the page: configuration,
//! translations, assets and the scenario table. Once mounted, every widget
//! operation is total and reports rejected intents as values instead.

use thiserror::Error;

/// Result type alias for landing-sim operations.
pub type LandingResult<T> = Result<T, LandingError>;

/// Unified error type for all landing-sim operations.
#[derive(Debug, Error)]
pub enum LandingError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Content Errors =====
    /// A translation key has no value in the requested locale or its fallback.
    #[error("Missing translation '{key}' for locale '{locale}'")]
    MissingTranslation {
        /// Locale that was searched.
        locale: String,
        /// Dotted translation key.
        key: String,
    },

    /// A translation key resolved to a value of the wrong shape.
    #[error("Translation '{key}' is not {expected}")]
    TranslationShape {
        /// Dotted translation key.
        key: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },

    /// Asset path not present in the asset manifest.
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// Color literal that is not `#rrggbb`.
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    // ===== Construction Contracts =====
    /// A carousel was constructed over zero scenarios.
    #[error("Carousel requires at least one scenario")]
    EmptyCarousel,

    /// The simulator's canned output catalog is empty.
    #[error("Canned output catalog is empty")]
    EmptyCatalog,

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LandingError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a missing-translation error.
    #[must_use]
    pub fn missing_translation(locale: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingTranslation {
            locale: locale.into(),
            key: key.into(),
        }
    }

    /// Check if this error comes from loaded content rather than configuration.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTranslation { .. }
                | Self::TranslationShape { .. }
                | Self::UnknownAsset(_)
                | Self::InvalidColor(_)
        )
    }
}

impl From<serde_json::Error> for LandingError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
