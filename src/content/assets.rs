//! Asset reference resolution.
//!
//! Widgets never decode images; they carry an [`AssetRef`] that the rendering
//! surface knows how to display.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::AssetsConfig;
use crate::error::{LandingError, LandingResult};

/// Opaque handle to a static asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Resolved location, as handed to the rendering surface.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves asset paths to handles.
pub trait AssetResolver {
    /// Resolve `path`.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::UnknownAsset` if the path is not served.
    fn resolve(&self, path: &str) -> LandingResult<AssetRef>;
}

/// Assets served from a fixed base URL.
///
/// With an empty manifest every path resolves; otherwise only listed paths do.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    base_url: String,
    manifest: BTreeSet<String>,
}

impl StaticAssets {
    /// Create a resolver rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            manifest: BTreeSet::new(),
        }
    }

    /// Restrict resolution to the given paths.
    #[must_use]
    pub fn with_manifest<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.manifest = paths
            .into_iter()
            .map(|p| normalize(p.as_ref()).to_string())
            .collect();
        self
    }

    /// Build from the `assets` configuration section.
    #[must_use]
    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(config.base_url.clone()).with_manifest(&config.manifest)
    }

    /// Number of paths in the manifest.
    #[must_use]
    pub fn manifest_len(&self) -> usize {
        self.manifest.len()
    }
}

fn normalize(path: &str) -> &str {
    path.trim().trim_start_matches('/')
}

impl AssetResolver for StaticAssets {
    fn resolve(&self, path: &str) -> LandingResult<AssetRef> {
        let relative = normalize(path);
        if relative.is_empty() {
            return Err(LandingError::UnknownAsset(path.to_string()));
        }
        if !self.manifest.is_empty() && !self.manifest.contains(relative) {
            return Err(LandingError::UnknownAsset(path.to_string()));
        }

        let base = self.base_url.trim_end_matches('/');
        Ok(AssetRef(format!("{base}/{relative}")))
    }
}
