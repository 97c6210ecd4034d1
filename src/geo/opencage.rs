//! OpenCage geocoding backend
//!
//! One JSON endpoint serves both directions; the `q` parameter is either a
//! `lat,lng` pair or free text.

use crate::constants::api::{OPENCAGE_JSON_PATH, USER_AGENT};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::geo::{GeocodeResult, GeocodingService};
use serde::Deserialize;
use tracing::debug;

/// OpenCage geocoding client
#[derive(Debug, Clone)]
pub struct OpenCageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// OpenCage response body
#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: Option<OpenCageStatus>,
}

/// Status block included in every OpenCage response
#[derive(Debug, Deserialize)]
struct OpenCageStatus {
    code: u16,
    message: String,
}

impl OpenCageClient {
    /// Create a client for `base_url` (e.g. `https://api.opencagedata.com`)
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build the request URL for an already-escaped `q` value
    fn url(&self, q: &str) -> String {
        format!(
            "{}{}?key={}&q={}&pretty=1",
            self.base_url,
            OPENCAGE_JSON_PATH,
            urlencoding::encode(&self.api_key),
            q
        )
    }

    fn reverse_url(&self, coordinate: Coordinate) -> String {
        self.url(&coordinate.to_query())
    }

    fn forward_url(&self, query: &str) -> String {
        self.url(&urlencoding::encode(query))
    }

    /// Issue a request and return its results
    async fn fetch(&self, url: &str) -> Result<Vec<GeocodeResult>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<OpenCageResponse>(&body)
                .ok()
                .and_then(|r| r.status)
                .map(|s| format!(" ({} {})", s.code, s.message))
                .unwrap_or_default();
            return Err(Error::Geocoding(format!(
                "OpenCage returned status: {}{}",
                status, detail
            )));
        }

        let parsed: OpenCageResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Geocoding(format!("Failed to parse OpenCage response: {}", e)))?;

        debug!("OpenCage returned {} result(s)", parsed.results.len());
        Ok(parsed.results)
    }
}

impl GeocodingService for OpenCageClient {
    async fn reverse(&self, coordinate: Coordinate) -> Result<Vec<GeocodeResult>> {
        self.fetch(&self.reverse_url(coordinate)).await
    }

    async fn forward(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        self.fetch(&self.forward_url(query)).await
    }
}
