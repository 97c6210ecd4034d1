//! Server shared state
//!
//! Holds the handle to the running screen and a few facts for `/api/status`.

use crate::screen::ScreenHandle;

/// Shared state for the HTTP server
pub struct AppState {
    /// Handle to the screen task
    pub screen: ScreenHandle,

    /// Name of the location provider in use
    pub provider: String,

    /// Geocoding service host
    pub geocoder_url: String,

    /// Whether an API key was found for the geocoder
    pub geocoder_configured: bool,
}

impl AppState {
    /// Create new application state
    pub fn new(
        screen: ScreenHandle,
        provider: impl Into<String>,
        geocoder_url: impl Into<String>,
        geocoder_configured: bool,
    ) -> Self {
        Self {
            screen,
            provider: provider.into(),
            geocoder_url: geocoder_url.into(),
            geocoder_configured,
        }
    }
}
