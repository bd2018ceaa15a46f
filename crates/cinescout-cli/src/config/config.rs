//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Radius used by `cinemas nearby` when neither the flag nor the config sets one.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb client settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
    /// Google Places client settings.
    #[serde(default)]
    pub places: PlacesConfig,
}

/// `[omdb]` section.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[places]` section.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct PlacesConfig {
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Search radius in meters used when `--radius` is omitted.
    #[serde(default)]
    pub default_radius: Option<u32>,
}

/// Parses an optional base URL setting.
fn parse_base_url(section: &str, value: Option<&str>) -> Result<Option<Url>> {
    value
        .map(|v| {
            Url::parse(v).with_context(|| format!("invalid [{section}] base_url: {v}"))
        })
        .transpose()
}

impl OmdbConfig {
    /// Returns the parsed base URL override, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        parse_base_url("omdb", self.base_url.as_deref())
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl PlacesConfig {
    /// Returns the parsed base URL override, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        parse_base_url("places", self.base_url.as_deref())
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the radius to search with when no flag is given.
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.default_radius.unwrap_or(DEFAULT_RADIUS_METERS)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
