//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb endpoint and maps title search
//! and detail responses into domain types.

mod api;
mod client;
mod types;
mod wire;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{MovieClient, MovieClientBuilder};
pub use types::{
    MediaType, MovieDetail, MovieDetailParams, MovieSearchResult, MovieSummary, Rating,
    SearchMoviesParams,
};
