//! Geocoding module
//!
//! Resolves coordinates to place names (reverse) and place names to
//! coordinates (forward).

pub mod opencage;

use crate::config::GeocoderConfig;
use crate::coord::Coordinate;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use opencage::OpenCageClient;

/// Point geometry of a geocoder result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub lat: f64,
    pub lng: f64,
}

impl From<Geometry> for Coordinate {
    fn from(geometry: Geometry) -> Self {
        Coordinate::new(geometry.lat, geometry.lng)
    }
}

/// A single geocoder match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Formatted address of the match
    pub formatted: String,
    pub geometry: Geometry,
}

/// Trait for geocoding backends
///
/// Both lookups return every match in the service's order. An empty list is
/// a valid answer, not an error.
pub trait GeocodingService: Send + Sync {
    /// Resolve a coordinate into place names
    fn reverse(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Vec<GeocodeResult>>> + Send;

    /// Resolve free text into coordinates
    fn forward(&self, query: &str) -> impl Future<Output = Result<Vec<GeocodeResult>>> + Send;
}

/// Get the configured geocoding backend
pub fn get_geocoder(config: &GeocoderConfig, api_key: String) -> OpenCageClient {
    OpenCageClient::new(&config.base_url, api_key)
}
