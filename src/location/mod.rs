//! Location providers
//!
//! A location provider yields the current position once per request. The
//! screen asks for a position on mount and on every refresh.

pub mod fixed;
pub mod ip;

use crate::config::LocationConfig;
use crate::constants::location::{MAXIMUM_AGE_MS, TIMEOUT_MS};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub use fixed::FixedLocationProvider;
pub use ip::IpLocationProvider;

/// Options for a one-shot position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most accurate fix the provider can give
    pub enable_high_accuracy: bool,
    /// Give up on the request after this long
    pub timeout: Duration,
    /// A cached fix younger than this may be returned instead of a fresh read
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_millis(TIMEOUT_MS),
            maximum_age: Duration::from_millis(MAXIMUM_AGE_MS),
        }
    }
}

/// A position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Coordinate,
    /// When the fix was taken
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// A fix taken now
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Utc::now(),
        }
    }

    /// Whether this fix is young enough to satisfy `maximum_age`
    pub fn is_fresh(&self, maximum_age: Duration) -> bool {
        // A fix stamped in the future counts as brand new
        let age = (Utc::now() - self.timestamp).to_std().unwrap_or(Duration::ZERO);
        age < maximum_age
    }
}

/// Why a position could not be obtained
///
/// The `Display` text is the human-readable message shown on the screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Request timed out")]
    Timeout,

    #[error("{0}")]
    Unavailable(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Trait for location providers
pub trait LocationProvider: Send + Sync {
    /// Provider name, as used in config
    fn name(&self) -> &'static str;

    /// Get the current position once
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = std::result::Result<Position, LocationError>> + Send;
}

/// Provider selected at runtime from config
#[derive(Debug)]
pub enum Provider {
    Ip(IpLocationProvider),
    Fixed(FixedLocationProvider),
}

impl Provider {
    /// Build the provider named in the `[location]` config section
    pub fn from_config(config: &LocationConfig) -> Result<Self> {
        match config.provider.to_lowercase().as_str() {
            "ip" => Ok(Self::Ip(IpLocationProvider::with_url(&config.ip_api_url))),
            "fixed" => {
                let coordinate = Coordinate::new(config.latitude, config.longitude);
                coordinate.validate()?;
                Ok(Self::Fixed(FixedLocationProvider::new(coordinate)))
            }
            other => Err(Error::Config(format!("Unknown location provider: {}", other))),
        }
    }
}

impl LocationProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Self::Ip(p) => p.name(),
            Self::Fixed(p) => p.name(),
        }
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError> {
        match self {
            Self::Ip(p) => p.current_position(options).await,
            Self::Fixed(p) => p.current_position(options).await,
        }
    }
}

/// List the provider names accepted by `location.provider`
pub fn available_providers() -> Vec<&'static str> {
    vec!["ip", "fixed"]
}
