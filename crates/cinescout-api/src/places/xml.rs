//! XML response wrapper types, custom deserializers and mapping.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use super::types::{Cinema, google_maps_link};
use crate::error::ApiError;

/// Service name used in errors.
const SERVICE: &str = "Places";

/// Deserializes empty strings as `None` (for `String` fields).
pub fn deserialize_empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let result = Option::deserialize(deserializer);
    let s: Option<String> = result.map_err(D::Error::custom)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserializes empty or unparsable strings as `None` (for `u32` fields).
pub fn deserialize_empty_string_as_none_u32<'de, D>(
    deserializer: D,
) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let result = Option::deserialize(deserializer);
    let s: Option<String> = result.map_err(D::Error::custom)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => Ok(v
            .parse::<u32>()
            .inspect_err(|e| tracing::warn!(value = v, error = %e, "Ignoring unparsable u32 field"))
            .ok()),
    }
}

/// Deserializes empty or unparsable strings as `None` (for `f64` fields).
pub fn deserialize_empty_string_as_none_f64<'de, D>(
    deserializer: D,
) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let result = Option::deserialize(deserializer);
    let s: Option<String> = result.map_err(D::Error::custom)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => Ok(v
            .parse::<f64>()
            .inspect_err(|e| tracing::warn!(value = v, error = %e, "Ignoring unparsable f64 field"))
            .ok()),
    }
}

/// `nearbysearch/xml` full response.
#[derive(Debug, Deserialize)]
#[serde(rename = "PlaceSearchResponse")]
pub struct PlaceSearchResponse {
    /// Request status (`OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...).
    #[serde(deserialize_with = "deserialize_empty_string_as_none", default)]
    pub status: Option<String>,
    /// Error detail accompanying a failure status.
    #[serde(deserialize_with = "deserialize_empty_string_as_none", default)]
    pub error_message: Option<String>,
    /// Result items.
    #[serde(rename = "result", default)]
    pub results: Vec<CinemaCandidate>,
}

/// A single `<result>` element.
#[derive(Debug, Deserialize)]
pub struct CinemaCandidate {
    #[serde(deserialize_with = "deserialize_empty_string_as_none", default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_empty_string_as_none", default)]
    pub vicinity: Option<String>,
    #[serde(deserialize_with = "deserialize_empty_string_as_none_f64", default)]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "deserialize_empty_string_as_none_u32", default)]
    pub user_ratings_total: Option<u32>,
    #[serde(deserialize_with = "deserialize_empty_string_as_none", default)]
    pub place_id: Option<String>,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

/// Checks the response status. `OK`, `ZERO_RESULTS` and a missing
/// status are accepted.
pub fn check_status(response: &PlaceSearchResponse) -> Result<(), ApiError> {
    match response.status.as_deref() {
        None | Some("OK" | "ZERO_RESULTS") => Ok(()),
        Some(status) => Err(ApiError::Upstream {
            service: SERVICE,
            status: String::from(status),
            message: response.error_message.clone().unwrap_or_default(),
        }),
    }
}

/// Maps one candidate. Returns `None` if `name` or `place_id` is missing.
pub fn map_candidate(candidate: CinemaCandidate) -> Option<Cinema> {
    let name = candidate.name?;
    let place_id = candidate.place_id?;
    Some(Cinema {
        name,
        address: candidate.vicinity.unwrap_or_default(),
        rating: candidate.rating,
        user_ratings_count: candidate.user_ratings_total,
        types: candidate.types,
        google_maps_link: google_maps_link(&place_id),
    })
}
