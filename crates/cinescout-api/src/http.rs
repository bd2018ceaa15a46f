//! Shared transport construction and request helpers.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent sent by both clients.
pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the default transport (gzip enabled).
pub(crate) fn build_client(user_agent: &str) -> Result<Client, ApiError> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .build()
        .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))
}

/// Parses a base URL, falling back to `default` when none is given.
pub(crate) fn resolve_base_url(url: Option<Url>, default: &str) -> Result<Url, ApiError> {
    match url {
        Some(url) => Ok(url),
        None => Url::parse(default)
            .map_err(|e| ApiError::Config(format!("invalid default base URL: {e}"))),
    }
}

/// Renders a request URL with the value of `secret_param` masked.
pub(crate) fn redact(url: &Url, secret_param: &str) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == secret_param {
                String::from("***")
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
