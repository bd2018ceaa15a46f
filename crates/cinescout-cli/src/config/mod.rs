//! Application configuration module.
//!
//! Manages the optional TOML config file holding endpoint overrides,
//! timeouts and the default search radius. API keys are never read
//! from it.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, OmdbConfig, PlacesConfig};
pub use paths::resolve_config_path;
