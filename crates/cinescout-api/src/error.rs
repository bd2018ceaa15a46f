//! Error type shared by the OMDb and Google Places clients.

use thiserror::Error;

/// Errors returned by client construction and API operations.
///
/// Which failure classes an operation returns and which it reports as
/// "no result" is documented on each operation.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The API key is absent or empty.
    #[error("API key is not set in the environment variables.")]
    MissingApiKey,

    /// The client could not be constructed (bad base URL, transport build failure).
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("{service} API error (HTTP {status})")]
    Status {
        /// Upstream name.
        service: &'static str,
        /// HTTP status returned.
        status: reqwest::StatusCode,
    },

    /// Network, timeout or connection level failure.
    #[error("{service} request failed")]
    Transport {
        /// Upstream name.
        service: &'static str,
        /// Underlying transport error, without the request URL.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not in the expected shape.
    #[error("{service} response decoding failed: {message}")]
    Decode {
        /// Upstream name.
        service: &'static str,
        /// Decoder message.
        message: String,
    },

    /// The upstream reported an error inside a successful response.
    #[error("{service} API returned {status}: {message}")]
    Upstream {
        /// Upstream name.
        service: &'static str,
        /// Upstream status string (e.g. `REQUEST_DENIED`).
        status: String,
        /// Upstream error message, if any.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` for errors an operator fixes by changing configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::Config(_))
    }

    /// Wraps a transport error.
    ///
    /// The request URL is stripped from `source`; it carries the API key.
    pub(crate) fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport {
            service,
            source: source.without_url(),
        }
    }

    /// Builds a decode error with a preview of the offending body.
    pub(crate) fn decode(service: &'static str, err: impl std::fmt::Display, body: &str) -> Self {
        let preview: String = body.chars().take(200).collect();
        Self::Decode {
            service,
            message: format!("{err} (len={}): {preview}", body.len()),
        }
    }
}
