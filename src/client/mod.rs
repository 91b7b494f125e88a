//! City-search API client.
//!
//! [`CityLookup`] is the seam between the UI and the network: the fetch
//! source only knows the trait, and tests substitute an in-memory lookup.
//! [`GeoDbClient`] is the production implementation, a thin reqwest wrapper
//! around `GET /v1/geo/cities` on a RapidAPI host.
//!
//! # Example
//!
//! ```no_run
//! use citysearch::client::{ApiConfig, CityLookup, GeoDbClient};
//!
//! # async fn example() -> Result<(), citysearch::model::FetchError> {
//! let config = ApiConfig::new("wft-geo-db.p.rapidapi.com", "my-key");
//! let client = GeoDbClient::new(&config)?;
//! let cities = client.search_cities("Ber", 5).await?;
//! println!("{} cities", cities.len());
//! # Ok(())
//! # }
//! ```

use crate::model::{CitiesResponse, City, FetchError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default RapidAPI host for GeoDB Cities.
pub const DEFAULT_API_HOST: &str = "wft-geo-db.p.rapidapi.com";

/// Endpoint path, relative to the base URL.
pub const CITIES_PATH: &str = "v1/geo/cities";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Header carrying the API host.
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("citysearch/", env!("CARGO_PKG_VERSION"));

// ===== ApiConfig =====

/// Connection settings for the city-search API.
///
/// Resolved once at startup by the config loader and injected into the
/// client; nothing reads the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// RapidAPI host, sent as `x-rapidapi-host`.
    pub host: String,
    /// RapidAPI key, sent as `x-rapidapi-key`.
    pub key: String,
    /// Override for the scheme + authority (+ optional path prefix).
    /// Defaults to `https://{host}`.
    pub base_url: Option<String>,
    /// Transport timeout for a whole request.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Config for `host` and `key` with default base URL and timeout.
    pub fn new(host: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            key: key.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Base URL requests are sent to.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.host))
    }
}

// ===== CityLookup =====

/// Source of city search results.
pub trait CityLookup: Send + Sync + Clone + 'static {
    /// Find up to `limit` cities whose name starts with `name_prefix`.
    ///
    /// Returns cities in the order the backend ranks them.
    fn search_cities(
        &self,
        name_prefix: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<City>, FetchError>> + Send;
}

// ===== GeoDbClient =====

/// HTTP client for the GeoDB Cities API.
#[derive(Debug, Clone)]
pub struct GeoDbClient {
    client: Client,
    endpoint: Url,
}

impl GeoDbClient {
    /// Build a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unparseable base URL,
    /// `FetchError::InvalidHeader` if the key or host cannot be sent as a
    /// header, and `FetchError::Client` if reqwest cannot build the client.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let endpoint = endpoint_url(&config.resolved_base_url())?;

        let mut key = HeaderValue::from_str(&config.key).map_err(|_| FetchError::InvalidHeader {
            header: API_KEY_HEADER,
        })?;
        key.set_sensitive(true);
        let host = HeaderValue::from_str(&config.host).map_err(|_| FetchError::InvalidHeader {
            header: API_HOST_HEADER,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(API_HOST_HEADER, host);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Full URL of the cities endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CityLookup for GeoDbClient {
    fn search_cities(
        &self,
        name_prefix: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<City>, FetchError>> + Send {
        debug!(url = %self.endpoint, name_prefix, limit, "Requesting cities");
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("namePrefix", name_prefix.to_string()), ("limit", limit.to_string())]);

        async move {
            let response = request.send().await.map_err(FetchError::Request)?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(FetchError::Request)?;
            let parsed: CitiesResponse =
                serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

            Ok(parsed.data)
        }
    }
}

/// Join the cities path onto `base`, keeping any path prefix in `base`.
fn endpoint_url(base: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(CITIES_PATH).map_err(|e| invalid(e.to_string()))
}

// ===== Test support =====

/// In-memory lookup for tests.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Returns a fixed answer and records every call.
    #[derive(Clone, Default)]
    pub(crate) struct FakeLookup {
        cities: Vec<City>,
        fail: bool,
        calls: Arc<Mutex<Vec<(String, u32)>>>,
    }

    impl FakeLookup {
        /// Lookup answering with `cities`, truncated to the requested limit.
        pub(crate) fn with_cities(cities: Vec<City>) -> Self {
            Self {
                cities,
                ..Self::default()
            }
        }

        /// Lookup that always fails with a transport error.
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        /// `(name_prefix, limit)` of every call so far.
        pub(crate) fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl CityLookup for FakeLookup {
        fn search_cities(
            &self,
            name_prefix: &str,
            limit: u32,
        ) -> impl Future<Output = Result<Vec<City>, FetchError>> + Send {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((name_prefix.to_string(), limit));
            }
            let result = if self.fail {
                Err(FetchError::Status { status: 503 })
            } else {
                Ok(self
                    .cities
                    .iter()
                    .filter(|c| c.name.starts_with(name_prefix))
                    .take(limit as usize)
                    .cloned()
                    .collect())
            };
            async move { result }
        }
    }

    /// `n` numbered cities.
    pub(crate) fn numbered_cities(n: usize) -> Vec<City> {
        (1..=n)
            .map(|i| City::new(i.to_string(), format!("Town{i}"), "Freedonia", "FD"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: Some(server.base_url()),
            ..ApiConfig::new("geo.example.test", "secret-key")
        }
    }

    fn body(items: serde_json::Value) -> serde_json::Value {
        json!({ "data": items, "metadata": { "currentOffset": 0, "totalCount": 2 } })
    }

    // ===== endpoint_url =====

    #[test]
    fn default_base_url_is_https_host() {
        let config = ApiConfig::new("geo.example.test", "k");
        assert_eq!(config.resolved_base_url(), "https://geo.example.test");

        let client = GeoDbClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://geo.example.test/v1/geo/cities"
        );
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let url = endpoint_url("http://localhost:8080/proxy").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v1/geo/cities");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ApiConfig {
            base_url: Some("not a url".to_string()),
            ..ApiConfig::new("h", "k")
        };
        assert!(matches!(
            GeoDbClient::new(&config),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let config = ApiConfig::new("geo.example.test", "bad\nkey");
        assert!(matches!(
            GeoDbClient::new(&config),
            Err(FetchError::InvalidHeader {
                header: API_KEY_HEADER
            })
        ));
    }

    // ===== search_cities =====

    #[tokio::test]
    async fn sends_query_params_and_rapidapi_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/geo/cities")
                    .query_param("namePrefix", "Par")
                    .query_param("limit", "5")
                    .header(API_KEY_HEADER, "secret-key")
                    .header(API_HOST_HEADER, "geo.example.test");
                then.status(200).json_body(body(json!([
                    {"id": 1, "name": "Paris", "country": "France", "countryCode": "FR"},
                    {"id": 2, "name": "Parma", "country": "Italy", "countryCode": "IT"}
                ])));
            })
            .await;

        let client = GeoDbClient::new(&config_for(&server)).unwrap();
        let cities = client.search_cities("Par", 5).await.unwrap();

        mock.assert_async().await;
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Paris", "Parma"]);
        assert_eq!(cities[1].country_code, "IT");
    }

    #[tokio::test]
    async fn empty_prefix_is_still_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/geo/cities")
                    .query_param_exists("namePrefix")
                    .query_param("limit", "3");
                then.status(200).json_body(body(json!([])));
            })
            .await;

        let client = GeoDbClient::new(&config_for(&server)).unwrap();
        let cities = client.search_cities("", 3).await.unwrap();

        mock.assert_async().await;
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v1/geo/cities");
                then.status(429).body("Too many requests");
            })
            .await;

        let client = GeoDbClient::new(&config_for(&server)).unwrap();
        let result = client.search_cities("a", 5).await;

        assert!(matches!(result, Err(FetchError::Status { status: 429 })));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v1/geo/cities");
                then.status(200).body("{\"message\":\"You are not subscribed\"}");
            })
            .await;

        let client = GeoDbClient::new(&config_for(&server)).unwrap();
        let result = client.search_cities("a", 5).await;

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/v1/geo/cities");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(body(json!([])));
            })
            .await;

        let config = ApiConfig {
            timeout: Duration::from_millis(50),
            ..config_for(&server)
        };
        let client = GeoDbClient::new(&config).unwrap();
        let result = client.search_cities("a", 5).await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        let config = ApiConfig {
            base_url: Some("http://127.0.0.1:1".to_string()),
            ..ApiConfig::new("geo.example.test", "k")
        };
        let client = GeoDbClient::new(&config).unwrap();
        let result = client.search_cities("a", 5).await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
