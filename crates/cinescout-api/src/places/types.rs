//! Google Places domain types and request parameters.

/// Google Maps link prefix; the place id is appended.
const GOOGLE_MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/?q=place_id:";

/// A cinema near the searched location.
#[derive(Debug, Clone, PartialEq)]
pub struct Cinema {
    /// Display name.
    pub name: String,
    /// Short address (Places `vicinity`).
    pub address: String,
    /// Average user rating (1.0-5.0).
    pub rating: Option<f64>,
    /// Number of user ratings.
    pub user_ratings_count: Option<u32>,
    /// Place types (e.g. `movie_theater`, `establishment`).
    pub types: Vec<String>,
    /// Google Maps page for the place.
    pub google_maps_link: String,
}

/// Builds the Google Maps link for a place id.
#[must_use]
pub fn google_maps_link(place_id: &str) -> String {
    format!("{GOOGLE_MAPS_PLACE_URL}{place_id}")
}

/// Parameters for a nearby cinema search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbySearchParams {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Search radius in meters.
    pub radius_meters: u32,
}

impl NearbySearchParams {
    /// Creates search params around a point.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, radius_meters: u32) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }

    /// Formats the `location` query value (`lat,lon`).
    pub(crate) fn location(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}
