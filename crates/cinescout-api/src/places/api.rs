//! `CinemaApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::ApiError;

use super::types::{Cinema, NearbySearchParams};

/// Google Places API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CinemaApi: Send)]
pub trait LocalCinemaApi {
    /// Finds movie theaters within a radius of a point.
    ///
    /// An empty result is `Ok(vec![])`, not an error.
    ///
    /// # Errors
    ///
    /// - `ApiError::Status` on a non-success HTTP status.
    /// - `ApiError::Transport` on network failure.
    /// - `ApiError::Decode` if the body is not the expected XML.
    /// - `ApiError::Upstream` if the response status is a failure
    ///   (`REQUEST_DENIED`, `INVALID_REQUEST`, ...).
    async fn nearby_cinemas(&self, params: &NearbySearchParams) -> Result<Vec<Cinema>, ApiError>;
}
