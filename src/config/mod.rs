//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/placefinder/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::location::{available_providers, PositionOptions};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding service settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Location provider settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Screen behaviour
    #[serde(default)]
    pub screen: ScreenConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Service host, without the endpoint path
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// API key; `OPENCAGE_API_KEY` takes precedence when set
    #[serde(default)]
    pub api_key: String,
}

/// Location provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Provider name: "ip" or "fixed"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Request the most accurate fix available
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,

    /// Position request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Accept a cached fix up to this many milliseconds old
    #[serde(default = "default_maximum_age_ms")]
    pub maximum_age_ms: u64,

    /// Latitude reported by the fixed provider
    #[serde(default)]
    pub latitude: f64,

    /// Longitude reported by the fixed provider
    #[serde(default)]
    pub longitude: f64,

    /// Endpoint used by the ip provider
    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,
}

/// Screen behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Ignore responses to requests that a newer request has superseded
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}
fn default_high_accuracy() -> bool {
    DEFAULT_HIGH_ACCURACY
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
fn default_maximum_age_ms() -> u64 {
    DEFAULT_MAXIMUM_AGE_MS
}
fn default_ip_api_url() -> String {
    DEFAULT_IP_API_URL.to_string()
}
fn default_discard_stale() -> bool {
    DEFAULT_DISCARD_STALE
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            api_key: String::new(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            high_accuracy: default_high_accuracy(),
            timeout_ms: default_timeout_ms(),
            maximum_age_ms: default_maximum_age_ms(),
            latitude: 0.0,
            longitude: 0.0,
            ip_api_url: default_ip_api_url(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            discard_stale_responses: default_discard_stale(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "api_key"] => Some(self.geocoder.api_key.clone()),

            ["location", "provider"] => Some(self.location.provider.clone()),
            ["location", "high_accuracy"] => Some(self.location.high_accuracy.to_string()),
            ["location", "timeout_ms"] => Some(self.location.timeout_ms.to_string()),
            ["location", "maximum_age_ms"] => Some(self.location.maximum_age_ms.to_string()),
            ["location", "latitude"] => Some(self.location.latitude.to_string()),
            ["location", "longitude"] => Some(self.location.longitude.to_string()),
            ["location", "ip_api_url"] => Some(self.location.ip_api_url.clone()),

            ["screen", "discard_stale_responses"] => {
                Some(self.screen.discard_stale_responses.to_string())
            }

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.to_string();
            }
            ["geocoder", "api_key"] => {
                self.geocoder.api_key = value.to_string();
            }

            ["location", "provider"] => {
                let provider = value.to_lowercase();
                if !available_providers().iter().any(|p| *p == provider) {
                    return Err(Error::Config(format!("Unknown location provider: {}", value)));
                }
                self.location.provider = provider;
            }
            ["location", "high_accuracy"] => {
                self.location.high_accuracy = parse(key, value)?;
            }
            ["location", "timeout_ms"] => {
                self.location.timeout_ms = parse(key, value)?;
            }
            ["location", "maximum_age_ms"] => {
                self.location.maximum_age_ms = parse(key, value)?;
            }
            ["location", "latitude"] => {
                self.location.latitude = parse(key, value)?;
            }
            ["location", "longitude"] => {
                self.location.longitude = parse(key, value)?;
            }
            ["location", "ip_api_url"] => {
                self.location.ip_api_url = value.to_string();
            }

            ["screen", "discard_stale_responses"] => {
                self.screen.discard_stale_responses = parse(key, value)?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse(key, value)?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoder.base_url",
            "geocoder.api_key",
            "location.provider",
            "location.high_accuracy",
            "location.timeout_ms",
            "location.maximum_age_ms",
            "location.latitude",
            "location.longitude",
            "location.ip_api_url",
            "screen.discard_stale_responses",
            "server.host",
            "server.port",
        ]
    }

    /// Resolve the geocoding API key
    ///
    /// `OPENCAGE_API_KEY` wins over the config file.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| Some(self.geocoder.api_key.clone()))
            .filter(|key| !key.trim().is_empty())
    }

    /// Resolve the API key or explain how to configure one
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| {
            Error::Config(format!(
                "No geocoding API key configured. Set {} or run `placefinder config geocoder.api_key <key>`",
                API_KEY_ENV
            ))
        })
    }

    /// Position request options from the `[location]` section
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.location.high_accuracy,
            timeout: Duration::from_millis(self.location.timeout_ms),
            maximum_age: Duration::from_millis(self.location.maximum_age_ms),
        }
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
