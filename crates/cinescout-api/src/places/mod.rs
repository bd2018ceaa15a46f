//! Google Places API client module.
//!
//! Handles HTTP requests to the Places `nearbysearch/xml` endpoint
//! and maps movie theater results into `Cinema` values.

mod api;
mod client;
mod types;
pub(crate) mod xml;

#[allow(clippy::module_name_repetitions)]
pub use api::{CinemaApi, LocalCinemaApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CinemaClient, CinemaClientBuilder};
pub use types::{Cinema, NearbySearchParams, google_maps_link};
