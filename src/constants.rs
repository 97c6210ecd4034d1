//! Centralized constants for the placefinder crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// OpenCage geocoding API host
    pub const OPENCAGE_URL: &str = "https://api.opencagedata.com";

    /// Path of the OpenCage JSON geocoding endpoint
    pub const OPENCAGE_JSON_PATH: &str = "/geocode/v1/json";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User agent sent with every outgoing request
    pub const USER_AGENT: &str = concat!("placefinder/", env!("CARGO_PKG_VERSION"));
}

/// Location request settings
pub mod location {
    /// How long a single position request may take
    pub const TIMEOUT_MS: u64 = 15_000;

    /// How old a cached fix may be and still be returned
    pub const MAXIMUM_AGE_MS: u64 = 10_000;
}

/// Text shown on the screen
pub mod messages {
    pub const TITLE: &str = "Location Information";
    pub const INPUT_PLACEHOLDER: &str = "Enter place name";
    pub const CHANGE_LOCATION: &str = "Change Location";
    pub const REFRESH_LOCATION: &str = "Refresh Current Location";
    pub const LOADING: &str = "Fetching location...";

    /// Prefix of the error shown when the provider fails
    pub const LOCATION_ERROR_PREFIX: &str = "Error getting location: ";

    pub const PLACE_NAME_NOT_FOUND: &str = "Place name not found";
    pub const PLACE_NAME_ERROR: &str = "Error fetching place name";
    pub const PLACE_NOT_FOUND: &str = "Place not found";
    pub const PLACE_COORDINATES_ERROR: &str = "Error fetching place coordinates";
    pub const EMPTY_SEARCH: &str = "Please enter a place name";
}
