//! `CinemaClient` - Google Places API client implementation.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalCinemaApi;
use super::types::{Cinema, NearbySearchParams};
use super::xml::{PlaceSearchResponse, check_status, map_candidate};
use crate::error::ApiError;
use crate::http::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, build_client, redact, resolve_base_url,
};
use crate::key::{ApiKey, GOOGLE_API_KEY_ENV};

/// Default base URL for the Places API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Nearby search endpoint, relative to the base URL.
const NEARBY_SEARCH_PATH: &str = "nearbysearch/xml";

/// Place type searched for.
const MOVIE_THEATER_TYPE: &str = "movie_theater";

/// Service name used in errors and logs.
const SERVICE: &str = "Places";

/// Query parameter carrying the key.
const KEY_PARAM: &str = "key";

/// Google Places API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CinemaClient {
    /// HTTP transport.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key.
    api_key: ApiKey,
    /// Per-request timeout.
    timeout: Duration,
}

/// Builder for `CinemaClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CinemaClientBuilder {
    base_url: Option<Url>,
    api_key: Option<ApiKey>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CinemaClientBuilder {
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
    /// - `ApiError::Config` if the base URL or transport is invalid.
    pub fn build(self) -> Result<CinemaClient, ApiError> {
        let api_key = self.api_key.ok_or(ApiError::MissingApiKey)?;
        let base_url = resolve_base_url(self.base_url, DEFAULT_BASE_URL)?;

        // Fail at construction rather than on the first request.
        base_url
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url}: {e}")))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_client(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?,
        };

        Ok(CinemaClient {
            http_client,
            base_url,
            api_key,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl CinemaClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CinemaClientBuilder {
        CinemaClientBuilder::new()
    }

    /// Builds a client with the key from `GOOGLE_API_KEY` and default settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::builder()
            .api_key(ApiKey::from_env(GOOGLE_API_KEY_ENV)?)
            .build()
    }

    /// Builds query parameters for a nearby search.
    fn build_nearby_query(&self, params: &NearbySearchParams) -> Vec<(&'static str, String)> {
        vec![
            ("location", params.location()),
            ("radius", params.radius_meters.to_string()),
            ("type", String::from(MOVIE_THEATER_TYPE)),
            (KEY_PARAM, String::from(self.api_key.expose())),
        ]
    }

    /// Parses a `nearbysearch/xml` body.
    pub(crate) fn parse_nearby_response(xml: &str) -> Result<Vec<Cinema>, ApiError> {
        let raw_result: Result<PlaceSearchResponse, _> = quick_xml::de::from_str(xml);
        let response = raw_result.map_err(|e| ApiError::decode(SERVICE, e, xml))?;
        check_status(&response)?;

        let received = response.results.len();
        let cinemas: Vec<Cinema> = response
            .results
            .into_iter()
            .filter_map(map_candidate)
            .collect();
        if cinemas.len() < received {
            tracing::warn!(
                received,
                kept = cinemas.len(),
                "Dropped results missing name or place_id"
            );
        }

        if cinemas.is_empty() {
            tracing::info!("No cinemas found within the specified radius.");
            return Ok(cinemas);
        }

        tracing::info!(count = cinemas.len(), "Found cinemas");
        Ok(cinemas)
    }

    /// Sends the nearby search request and decodes the result.
    async fn fetch_nearby(&self, params: &NearbySearchParams) -> Result<Vec<Cinema>, ApiError> {
        let url = self
            .base_url
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| ApiError::Config(format!("failed to join URL path: {e}")))?;

        let request = self
            .http_client
            .get(url)
            .query(&self.build_nearby_query(params))
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::transport(SERVICE, e))?;

        tracing::debug!(url = %redact(request.url(), KEY_PARAM), "Fetching cinemas");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(SERVICE, e))?;

        let status = response.status();
        tracing::debug!(%status, "Response received from Places API");
        if !status.is_success() {
            return Err(ApiError::Status {
                service: SERVICE,
                status,
            });
        }

        let xml = response
            .text()
            .await
            .map_err(|e| ApiError::transport(SERVICE, e))?;
        tracing::debug!(body_len = xml.len(), "Response body received");

        Self::parse_nearby_response(&xml)
    }
}

impl LocalCinemaApi for CinemaClient {
    #[instrument(skip_all)]
    async fn nearby_cinemas(&self, params: &NearbySearchParams) -> Result<Vec<Cinema>, ApiError> {
        self.fetch_nearby(params).await.inspect_err(|e| {
            tracing::error!(error = %e, "Error fetching cinemas");
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::float_cmp)]

    use super::*;

    fn test_client(uri: &str) -> CinemaClient {
        let base_url = format!("{uri}/maps/api/place/");
        CinemaClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key(ApiKey::new("test-key").unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = CinemaClient::builder().build();

        // Assert
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/maps/api/place/").unwrap();

        // Act
        let client = CinemaClient::builder()
            .base_url(custom_url.clone())
            .api_key(ApiKey::new("k").unwrap())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_clients_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<CinemaClient>();
        assert_send_sync::<crate::omdb::MovieClient>();
    }

    #[test]
    fn test_builder_accepts_injected_transport() {
        // Arrange
        let transport = Client::new();

        // Act
        let result = CinemaClient::builder()
            .api_key(ApiKey::new("k").unwrap())
            .http_client(transport)
            .build();

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_nearby_response() {
        // Arrange
        let xml = include_str!("../../../../fixtures/places/nearby_dublin.xml");

        // Act
        let cinemas = CinemaClient::parse_nearby_response(xml).unwrap();

        // Assert
        assert_eq!(cinemas.len(), 3);
        assert_eq!(cinemas[0].name, "Light House Cinema");
        assert_eq!(cinemas[0].address, "Market Square, Smithfield, Dublin 7");
        assert_eq!(cinemas[0].rating, Some(4.6));
        assert_eq!(cinemas[0].user_ratings_count, Some(3158));
        assert!(cinemas[0].types.contains(&String::from("movie_theater")));
        assert_eq!(
            cinemas[2].google_maps_link,
            "https://www.google.com/maps/place/?q=place_id:ChIJp_lB5IUOZ0gRzvH0C2D6qYw"
        );
    }

    #[test]
    fn test_parse_empty_document() {
        // Arrange
        let xml = "<PlaceSearchResponse></PlaceSearchResponse>";

        // Act
        let cinemas = CinemaClient::parse_nearby_response(xml).unwrap();

        // Assert
        assert!(cinemas.is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        // Arrange
        let xml = "<PlaceSearchResponse><result><name>Broken</result>";

        // Act
        let result = CinemaClient::parse_nearby_response(xml);

        // Assert
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_nearby_cinemas_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/nearby_two_cinemas.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/maps/api/place/nearbysearch/xml"))
            .and(wiremock::matchers::query_param("location", "40.7128,-74.006"))
            .and(wiremock::matchers::query_param("radius", "1000"))
            .and(wiremock::matchers::query_param("type", "movie_theater"))
            .and(wiremock::matchers::query_param("key", "test-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(40.7128, -74.006, 1000);

        // Act
        let cinemas = client.nearby_cinemas(&params).await.unwrap();

        // Assert
        assert_eq!(cinemas.len(), 2);
        assert_eq!(cinemas[0].name, "Cinema 1");
        assert_eq!(cinemas[0].rating, Some(4.5));
        assert_eq!(cinemas[1].rating, Some(4.0));
        assert!(cinemas[0].google_maps_link.contains("place_id_1"));
        assert!(cinemas[1].google_maps_link.contains("place_id_2"));
        assert!(cinemas[0].types.is_empty());
    }

    #[tokio::test]
    async fn test_nearby_cinemas_http_error_propagates() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(400).set_body_string("Error"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(40.7128, -74.006, 1000);

        // Act
        let result = client.nearby_cinemas(&params).await;

        // Assert
        assert!(matches!(
            result,
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::BAD_REQUEST
        ));
    }

    #[tokio::test]
    async fn test_nearby_cinemas_zero_results_is_empty() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/zero_results.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(0.0, 0.0, 10);

        // Act
        let cinemas = client.nearby_cinemas(&params).await.unwrap();

        // Assert
        assert!(cinemas.is_empty());
    }

    #[tokio::test]
    async fn test_nearby_cinemas_request_denied() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/request_denied.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(53.35, -6.26, 1000);

        // Act
        let result = client.nearby_cinemas(&params).await;

        // Assert
        assert!(matches!(result, Err(ApiError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_nearby_cinemas_timeout_is_transport_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/zero_results.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(xml_body)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = CinemaClient::builder()
            .base_url(
                format!("{}/maps/api/place/", mock_server.uri())
                    .parse()
                    .unwrap(),
            )
            .api_key(ApiKey::new("test-key").unwrap())
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let params = NearbySearchParams::new(53.35, -6.26, 1000);

        // Act
        let result = client.nearby_cinemas(&params).await;

        // Assert
        assert!(matches!(
            result,
            Err(ApiError::Transport { service: "Places", .. })
        ));
    }

    /// Renders an error with its `Debug` form and every `source()` in the chain.
    fn render_chain(err: &ApiError) -> String {
        let mut rendered = format!("{err:?} | {err}");
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            rendered.push_str(&format!(" | {cause} | {cause:?}"));
            source = cause.source();
        }
        rendered
    }

    #[tokio::test]
    async fn test_nearby_cinemas_transport_error_hides_api_key() {
        // Arrange
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = CinemaClient::builder()
            .base_url(
                format!("http://127.0.0.1:{port}/maps/api/place/")
                    .parse()
                    .unwrap(),
            )
            .api_key(ApiKey::new("SUPERSECRET123").unwrap())
            .build()
            .unwrap();
        let params = NearbySearchParams::new(53.35, -6.26, 1000);

        // Act
        let err = client.nearby_cinemas(&params).await.unwrap_err();

        // Assert
        assert!(matches!(err, ApiError::Transport { service: "Places", .. }));
        let rendered = render_chain(&err);
        assert!(!rendered.contains("SUPERSECRET123"), "{rendered}");
    }

    #[tokio::test]
    async fn test_nearby_cinemas_timeout_error_hides_api_key() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/zero_results.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(xml_body)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = CinemaClient::builder()
            .base_url(
                format!("{}/maps/api/place/", mock_server.uri())
                    .parse()
                    .unwrap(),
            )
            .api_key(ApiKey::new("SUPERSECRET123").unwrap())
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let params = NearbySearchParams::new(53.35, -6.26, 1000);

        // Act
        let err = client.nearby_cinemas(&params).await.unwrap_err();

        // Assert
        let rendered = render_chain(&err);
        assert!(!rendered.contains("SUPERSECRET123"), "{rendered}");
    }

    #[tokio::test]
    async fn test_nearby_cinemas_caller_deadline_cancels() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/zero_results.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(xml_body)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(53.35, -6.26, 1000);

        // Act
        let result =
            tokio::time::timeout(Duration::from_millis(50), client.nearby_cinemas(&params)).await;

        // Assert: the future is dropped at the deadline
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_nearby_cinemas_is_repeatable() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/nearby_dublin.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(53.35, -6.26, 2000);

        // Act
        let first = client.nearby_cinemas(&params).await.unwrap();
        let second = client.nearby_cinemas(&params).await.unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_result_logs_info() {
        use tracing::Level;
        use tracing_mock::{expect, subscriber};

        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/places/zero_results.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let params = NearbySearchParams::new(0.0, 0.0, 10);

        let (subscriber, handle) = subscriber::mock()
            .with_filter(|meta| {
                meta.is_event()
                    && *meta.level() == Level::INFO
                    && meta.target().starts_with("cinescout_api")
            })
            .event(
                expect::event()
                    .at_level(Level::INFO)
                    .with_fields(expect::msg("No cinemas found within the specified radius.")),
            )
            .run_with_handle();

        // Act
        {
            let _guard = tracing::subscriber::set_default(subscriber);
            client.nearby_cinemas(&params).await.unwrap();
        }

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_all_candidates_dropped_logs_no_cinemas() {
        use tracing::Level;
        use tracing::subscriber::with_default;
        use tracing_mock::{expect, subscriber};

        // Arrange
        let xml = r"<PlaceSearchResponse>
  <status>OK</status>
  <result>
    <name>Unlisted Screen</name>
    <vicinity>Nowhere</vicinity>
  </result>
</PlaceSearchResponse>";

        let (subscriber, handle) = subscriber::mock()
            .with_filter(|meta| {
                meta.is_event()
                    && *meta.level() == Level::INFO
                    && meta.target().starts_with("cinescout_api")
            })
            .event(
                expect::event()
                    .at_level(Level::INFO)
                    .with_fields(expect::msg("No cinemas found within the specified radius.")),
            )
            .only()
            .run_with_handle();

        // Act
        let cinemas = with_default(subscriber, || {
            CinemaClient::parse_nearby_response(xml).unwrap()
        });

        // Assert
        assert!(cinemas.is_empty());
        handle.assert_finished();
    }
}
