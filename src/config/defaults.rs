//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{IP_API_URL, OPENCAGE_URL};
use crate::constants::location::{MAXIMUM_AGE_MS, TIMEOUT_MS};

/// Default geocoding service host
pub const DEFAULT_GEOCODER_URL: &str = OPENCAGE_URL;

/// Environment variable that overrides `geocoder.api_key`
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";

/// Default location provider
pub const DEFAULT_PROVIDER: &str = "ip";

/// Default IP geolocation endpoint
pub const DEFAULT_IP_API_URL: &str = IP_API_URL;

/// Ask providers for their best fix
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Default position request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = TIMEOUT_MS;

/// Default cached fix tolerance in milliseconds
pub const DEFAULT_MAXIMUM_AGE_MS: u64 = MAXIMUM_AGE_MS;

/// Drop responses superseded by a newer request
pub const DEFAULT_DISCARD_STALE: bool = true;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "placefinder";
