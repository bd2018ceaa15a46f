//! API client library for cinescout.
//!
//! Provides clients for the OMDb movie API and the Google Places
//! nearby-search API.

/// Error type shared by both clients.
pub mod error;
/// Shared transport helpers.
mod http;
/// API key handling.
pub mod key;
/// OMDb API client.
pub mod omdb;
/// Google Places API client.
pub mod places;

pub use error::ApiError;
pub use http::DEFAULT_TIMEOUT;
pub use key::{ApiKey, GOOGLE_API_KEY_ENV, OMDB_API_KEY_ENV};
