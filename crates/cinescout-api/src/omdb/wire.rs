//! OMDb JSON wire types and the mapping into domain types.
//!
//! Every wire field is optional; required fields are checked in the
//! mapping functions so a malformed entry is dropped instead of failing
//! the whole response.

use serde::Deserialize;

use super::types::{MediaType, MovieDetail, MovieSearchResult, MovieSummary, Rating};

/// OMDb `Error` text for an empty search.
const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Search response (`?s=`).
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Hits (absent when `Response` is `False`).
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchItem>>,
    /// Total hit count, sent as a string.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    /// `"True"` or `"False"`.
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// Error text when `Response` is `False`.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// One entry of `Search`.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

/// Detail response (`?i=`).
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Option<Vec<WireRating>>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// One entry of `Ratings`.
#[derive(Debug, Deserialize)]
pub struct WireRating {
    #[serde(rename = "Source", default)]
    pub source: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

/// Outcome of mapping a search response.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Hits (possibly none).
    Found(MovieSearchResult),
    /// OMDb refused the query; carries its error text.
    Rejected(String),
}

/// Drops OMDb's `"N/A"` placeholder and empty strings.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "N/A"
    })
}

/// Returns `true` when the `Response` flag reports failure.
fn is_failure(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.eq_ignore_ascii_case("false"))
}

fn media_type(value: Option<&str>) -> MediaType {
    value.map_or_else(|| MediaType::Other(String::new()), MediaType::parse)
}

/// Maps one search hit. Returns `None` if `imdbID` or `Title` is missing.
pub fn map_summary(item: SearchItem) -> Option<MovieSummary> {
    let imdb_id = present(item.imdb_id)?;
    let title = present(item.title)?;
    Some(MovieSummary {
        imdb_id,
        title,
        year: present(item.year).unwrap_or_default(),
        media_type: media_type(item.media_type.as_deref()),
        poster_url: present(item.poster),
    })
}

/// Maps a search response, keeping upstream order.
pub fn map_search(response: SearchResponse) -> SearchOutcome {
    if is_failure(response.response.as_deref()) {
        let message = response.error.unwrap_or_default();
        if message == NOT_FOUND_MESSAGE {
            return SearchOutcome::Found(MovieSearchResult::empty());
        }
        return SearchOutcome::Rejected(message);
    }

    let items = response.search.unwrap_or_default();
    let received = items.len();
    let movies: Vec<MovieSummary> = items.into_iter().filter_map(map_summary).collect();
    if movies.len() < received {
        tracing::warn!(
            received,
            kept = movies.len(),
            "Dropped search entries missing imdbID or Title"
        );
    }

    let total_results = response
        .total_results
        .as_deref()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or_else(|| u32::try_from(movies.len()).unwrap_or(u32::MAX));

    SearchOutcome::Found(MovieSearchResult {
        movies,
        total_results,
    })
}

/// Maps a detail response. Returns `None` for a failure response or a
/// body missing `imdbID` or `Title`.
pub fn map_detail(response: DetailResponse) -> Option<MovieDetail> {
    if is_failure(response.response.as_deref()) {
        return None;
    }

    let imdb_id = present(response.imdb_id)?;
    let title = present(response.title)?;

    let ratings = response
        .ratings
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            Some(Rating {
                source: present(r.source)?,
                value: present(r.value)?,
            })
        })
        .collect();

    Some(MovieDetail {
        imdb_id,
        title,
        released: present(response.released),
        country: present(response.country),
        language: present(response.language),
        runtime: present(response.runtime),
        genre: present(response.genre),
        media_type: media_type(response.media_type.as_deref()),
        actors: present(response.actors),
        plot: present(response.plot),
        poster_url: present(response.poster),
        ratings,
    })
}
