//! IP-based location provider
//!
//! Uses ip-api.com to estimate the current position. The last fix is kept in
//! memory and reused while it is younger than the request's `maximum_age`.

use crate::constants::api::{IP_API_URL, USER_AGENT};
use crate::coord::Coordinate;
use crate::location::{LocationError, LocationProvider, Position, PositionOptions};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

/// IP location provider with an in-memory fix cache
#[derive(Debug)]
pub struct IpLocationProvider {
    client: reqwest::Client,
    url: String,
    last_fix: Mutex<Option<Position>>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocationProvider {
    /// Create a provider against the public ip-api.com endpoint
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    /// Create a provider against a specific endpoint
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: url.into(),
            last_fix: Mutex::new(None),
        }
    }

    /// Return the cached fix if it satisfies `maximum_age`
    async fn cached(&self, options: &PositionOptions) -> Option<Position> {
        let last_fix = self.last_fix.lock().await;
        (*last_fix).filter(|fix| fix.is_fresh(options.maximum_age))
    }

    /// Fetch a fresh position from ip-api.com
    async fn fetch_position(&self) -> Result<Position, LocationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LocationError::Unavailable(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            LocationError::Unavailable(format!("Failed to parse IP location response: {}", e))
        })?;

        if data.status != "success" {
            return Err(LocationError::Unavailable(
                data.message
                    .unwrap_or_else(|| "IP location lookup failed".to_string()),
            ));
        }

        let lat = data
            .lat
            .ok_or_else(|| LocationError::Unavailable("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| LocationError::Unavailable("No longitude in response".to_string()))?;

        Ok(Position::now(Coordinate::new(lat, lng)))
    }

    /// Forget the cached fix
    pub async fn clear_cache(&self) {
        *self.last_fix.lock().await = None;
    }
}

impl Default for IpLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for IpLocationProvider {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        if let Some(fix) = self.cached(options).await {
            debug!("Using cached IP fix from {}", fix.timestamp);
            return Ok(fix);
        }

        if options.enable_high_accuracy {
            debug!("High accuracy requested; IP geolocation is city-level at best");
        }

        let position = tokio::time::timeout(options.timeout, self.fetch_position())
            .await
            .map_err(|_| LocationError::Timeout)??;

        *self.last_fix.lock().await = Some(position);
        Ok(position)
    }
}
