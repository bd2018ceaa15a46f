//! OMDb domain types and request parameters.

use chrono::NaiveDate;

// --- Media type ---

/// Kind of title reported by OMDb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    /// Feature film.
    Movie,
    /// TV series.
    Series,
    /// Single episode of a series.
    Episode,
    /// Video game.
    Game,
    /// Any value OMDb adds later.
    Other(String),
}

impl MediaType {
    /// Parses the OMDb `Type` field.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            "game" => Self::Game,
            _ => Self::Other(String::from(value)),
        }
    }

    /// Returns the OMDb query value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Game => "game",
            Self::Other(v) => v,
        }
    }
}

// --- Search ---

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSummary {
    /// IMDb identifier (`tt...`).
    pub imdb_id: String,
    /// Title.
    pub title: String,
    /// Year or year range as reported (e.g. `2005` or `2008–2013`).
    pub year: String,
    /// Media type.
    pub media_type: MediaType,
    /// Poster image URL.
    pub poster_url: Option<String>,
}

/// Result of a title search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieSearchResult {
    /// Hits in upstream order.
    pub movies: Vec<MovieSummary>,
    /// Total number of matches across all pages.
    pub total_results: u32,
}

impl MovieSearchResult {
    /// A result with no matches.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            movies: Vec::new(),
            total_results: 0,
        }
    }

    /// Returns `true` if the page holds no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

// --- Detail ---

/// A rating from one source (IMDb, Rotten Tomatoes, Metacritic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    /// Rating source.
    pub source: String,
    /// Rating value as displayed (e.g. `7.9/10`, `85%`).
    pub value: String,
}

/// Full details for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetail {
    /// IMDb identifier.
    pub imdb_id: String,
    /// Title.
    pub title: String,
    /// Release date text (e.g. `29 Oct 2004`).
    pub released: Option<String>,
    /// Country list.
    pub country: Option<String>,
    /// Language list.
    pub language: Option<String>,
    /// Runtime text (e.g. `136 min`).
    pub runtime: Option<String>,
    /// Genre list.
    pub genre: Option<String>,
    /// Media type.
    pub media_type: MediaType,
    /// Main cast.
    pub actors: Option<String>,
    /// Plot summary.
    pub plot: Option<String>,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Ratings by source.
    pub ratings: Vec<Rating>,
}

impl MovieDetail {
    /// Parses `released` as a calendar date.
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.released
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%d %b %Y").ok())
    }

    /// Parses `runtime` (`"136 min"`) into minutes.
    #[must_use]
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .as_deref()
            .and_then(|s| s.trim().strip_suffix("min"))
            .and_then(|s| s.trim().parse().ok())
    }
}

// --- Parameters ---

/// Parameters for a title search (`?s=`).
#[derive(Debug, Clone)]
pub struct SearchMoviesParams {
    /// Search term. Not validated; callers pass a non-empty term.
    pub term: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
    /// Filter by year of release.
    pub year: Option<u32>,
    /// Filter by media type.
    pub media_type: Option<MediaType>,
}

impl SearchMoviesParams {
    /// Creates search params for the first page.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: 1,
            year: None,
            media_type: None,
        }
    }

    /// Sets the page. Values below 1 are raised to 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the media type filter.
    #[must_use]
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }
}

/// Parameters for a detail lookup (`?i=`).
#[derive(Debug, Clone)]
pub struct MovieDetailParams {
    /// IMDb identifier.
    pub imdb_id: String,
    /// Request the full plot instead of the short one.
    pub full_plot: bool,
}

impl MovieDetailParams {
    /// Creates detail params with the short plot.
    pub fn new(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            full_plot: false,
        }
    }

    /// Requests the full plot.
    #[must_use]
    pub const fn full_plot(mut self, full: bool) -> Self {
        self.full_plot = full;
        self
    }
}
