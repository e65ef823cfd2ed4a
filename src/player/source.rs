// Media source locator with optional cache busting
use rand::Rng;
use serde::Serialize;

use crate::settings::MediaSettings;

/// The locator handed to a media backend, e.g. `output.wav?cache_bust=0.4172`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceLocator(String);

impl SourceLocator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed clip the widget plays.
#[derive(Debug, Clone)]
pub struct MediaSource {
    path: String,
    /// Query parameter name used for cache busting, `None` disables it
    cache_bust_param: Option<String>,
}

impl MediaSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cache_bust_param: None,
        }
    }

    pub fn with_cache_bust(mut self, param: impl Into<String>) -> Self {
        self.cache_bust_param = Some(param.into());
        self
    }

    pub fn from_settings(settings: &MediaSettings) -> Self {
        let source = Self::new(settings.source.clone());
        if settings.cache_bust {
            source.with_cache_bust(settings.cache_bust_param.clone())
        } else {
            source
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build a fresh locator. Every call yields a different suffix so the
    /// webview never serves a stale copy of a clip that changed on disk.
    pub fn locator(&self) -> SourceLocator {
        self.locator_with(&mut rand::thread_rng())
    }

    pub fn locator_with<R: Rng>(&self, rng: &mut R) -> SourceLocator {
        match &self.cache_bust_param {
            Some(param) => {
                let separator = if self.path.contains('?') { '&' } else { '?' };
                let token: f64 = rng.gen();
                SourceLocator(format!("{}{}{}={}", self.path, separator, param, token))
            }
            None => SourceLocator(self.path.clone()),
        }
    }
}

impl Default for MediaSource {
    fn default() -> Self {
        Self::from_settings(&MediaSettings::default())
    }
}
