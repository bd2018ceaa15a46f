//! `MovieClient` - OMDb API client implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::LocalMovieApi;
use super::types::{MovieDetail, MovieDetailParams, MovieSearchResult, SearchMoviesParams};
use super::wire::{DetailResponse, SearchOutcome, SearchResponse, map_detail, map_search};
use crate::error::ApiError;
use crate::http::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, build_client, redact, resolve_base_url,
};
use crate::key::{ApiKey, OMDB_API_KEY_ENV};

/// Default base URL for the OMDb API.
const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Service name used in errors and logs.
const SERVICE: &str = "OMDb";

/// Query parameter carrying the key.
const KEY_PARAM: &str = "apikey";

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClient {
    /// HTTP transport.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key.
    api_key: ApiKey,
    /// Per-request timeout.
    timeout: Duration,
}

/// Builder for `MovieClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClientBuilder {
    base_url: Option<Url>,
    api_key: Option<ApiKey>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

/// A response that reached the client.
enum Fetched {
    /// Success status with its body.
    Body(String),
    /// Non-success status.
    Status(StatusCode),
}

impl MovieClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the User-Agent (default: `cinescout-api/<version>`).
    ///
    /// Ignored when a transport is supplied with `http_client`.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies the HTTP transport instead of building one.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `ApiError::MissingApiKey` if no key was set.
    /// - `ApiError::Config` if the transport cannot be built.
    pub fn build(self) -> Result<MovieClient, ApiError> {
        let api_key = self.api_key.ok_or(ApiError::MissingApiKey)?;
        let base_url = resolve_base_url(self.base_url, DEFAULT_BASE_URL)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_client(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?,
        };

        Ok(MovieClient {
            http_client,
            base_url,
            api_key,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl MovieClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> MovieClientBuilder {
        MovieClientBuilder::new()
    }

    /// Builds a client with the key from `OMDB_API_KEY` and default settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::builder()
            .api_key(ApiKey::from_env(OMDB_API_KEY_ENV)?)
            .build()
    }

    /// Builds the query for a title search.
    fn build_search_query(params: &SearchMoviesParams) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&str, String)> = vec![
            ("s", params.term.clone()),
            ("page", params.page.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("y", year.to_string()));
        }
        if let Some(ref media_type) = params.media_type {
            query.push(("type", String::from(media_type.as_str())));
        }
        query
    }

    /// Builds the query for a detail lookup.
    fn build_detail_query(params: &MovieDetailParams) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&str, String)> = vec![("i", params.imdb_id.clone())];
        if params.full_plot {
            query.push(("plot", String::from("full")));
        }
        query
    }

    /// Sends one GET request with the key appended.
    ///
    /// A non-success status is returned as `Fetched::Status` so each
    /// operation decides how to report it.
    async fn fetch(&self, query: &[(&str, String)]) -> Result<Fetched, ApiError> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(query)
            .query(&[(KEY_PARAM, self.api_key.expose())])
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::transport(SERVICE, e))?;

        tracing::debug!(url = %redact(request.url(), KEY_PARAM), "OMDb API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Fetched::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(SERVICE, e))?;
        tracing::debug!(%status, body_len = body.len(), "OMDb API response received");

        Ok(Fetched::Body(body))
    }
}

impl LocalMovieApi for MovieClient {
    #[instrument(skip_all)]
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<Option<MovieSearchResult>, ApiError> {
        let query = Self::build_search_query(params);

        let body = match self.fetch(&query).await {
            Ok(Fetched::Body(body)) => body,
            Ok(Fetched::Status(status)) => {
                tracing::error!(%status, term = %params.term, "OMDb search returned non-success status");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = ?e, term = %params.term, "Error occurred while fetching movies");
                return Ok(None);
            }
        };

        let response: SearchResponse = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::decode(SERVICE, e, &body);
                tracing::error!(error = %err, "Error occurred while decoding movies");
                return Ok(None);
            }
        };

        match map_search(response) {
            SearchOutcome::Found(result) => {
                tracing::info!(
                    count = result.movies.len(),
                    total = result.total_results,
                    page = params.page,
                    "OMDb search completed"
                );
                Ok(Some(result))
            }
            SearchOutcome::Rejected(message) => {
                tracing::error!(%message, term = %params.term, "OMDb rejected search");
                Ok(None)
            }
        }
    }

    #[instrument(skip_all)]
    async fn movie_details_with(
        &self,
        params: &MovieDetailParams,
    ) -> Result<Option<MovieDetail>, ApiError> {
        let query = Self::build_detail_query(params);

        let fetched = self.fetch(&query).await.inspect_err(|e| {
            tracing::error!(error = ?e, imdb_id = %params.imdb_id, "Error occurred while fetching movie details");
        })?;

        let body = match fetched {
            Fetched::Body(body) => body,
            Fetched::Status(status) => {
                tracing::error!(%status, imdb_id = %params.imdb_id, "OMDb detail returned non-success status");
                return Ok(None);
            }
        };

        let raw_result: Result<DetailResponse, _> = serde_json::from_str(&body);
        let response = raw_result
            .map_err(|e| ApiError::decode(SERVICE, e, &body))
            .inspect_err(|e| tracing::error!(error = %e, "Error occurred while decoding movie details"))?;

        let detail = map_detail(response);
        if detail.is_none() {
            tracing::warn!(imdb_id = %params.imdb_id, "OMDb returned no movie for id");
        }
        Ok(detail)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, imdb_id: &str) -> Result<Option<MovieDetail>, ApiError> {
        self.movie_details_with(&MovieDetailParams::new(imdb_id))
            .await
    }
}
