//! API key handling.

use std::fmt;

use crate::error::ApiError;

/// Environment variable holding the OMDb API key.
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

/// Environment variable holding the Google Places API key.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// A non-empty API key.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` if the value is empty or whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ApiError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(Self(value))
    }

    /// Reads the key from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` if the variable is unset, not
    /// valid unicode, or empty.
    pub fn from_env(var: &str) -> Result<Self, ApiError> {
        let Ok(value) = std::env::var(var) else {
            tracing::error!(var, "API key is not set in the environment variables.");
            return Err(ApiError::MissingApiKey);
        };
        Self::new(value).inspect_err(|_| {
            tracing::error!(var, "API key is empty");
        })
    }

    /// Returns the raw key for use in a query string.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
