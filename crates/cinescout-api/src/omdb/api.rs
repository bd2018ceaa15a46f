//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::ApiError;

use super::types::{MovieDetail, MovieDetailParams, MovieSearchResult, SearchMoviesParams};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Searches titles by term.
    ///
    /// Upstream unavailability (non-success status, transport failure,
    /// undecodable body) is logged and reported as `Ok(None)`. A search
    /// with no matches returns `Ok(Some(_))` with an empty list.
    ///
    /// # Errors
    ///
    /// Currently never fails once the client is built; the `Result` keeps
    /// configuration errors surfaceable through the trait.
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<Option<MovieSearchResult>, ApiError>;

    /// Fetches full details for one IMDb id.
    ///
    /// A non-success status or an unknown id is logged and reported as
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` on network failure and
    /// `ApiError::Decode` if the body is not JSON.
    async fn movie_details_with(
        &self,
        params: &MovieDetailParams,
    ) -> Result<Option<MovieDetail>, ApiError>;

    /// Fetches details with the short plot.
    ///
    /// # Errors
    ///
    /// Same as `movie_details_with`.
    async fn movie_details(&self, imdb_id: &str) -> Result<Option<MovieDetail>, ApiError>;
}
