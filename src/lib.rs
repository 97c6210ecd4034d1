//! placefinder: where am I, and where is that?
//!
//! A library and CLI tool that shows the current geographic location with a
//! human-readable place name, and looks up other places by name.
//!
//! ## Features
//!
//! - Location providers (IP geolocation, fixed coordinate) with timeout and
//!   cached-fix tolerance
//! - Forward and reverse geocoding through OpenCage
//! - A reducer-driven location screen with stale-response protection
//! - Terminal shell, one-shot commands and an HTTP API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use placefinder::geo::OpenCageClient;
//! use placefinder::location::IpLocationProvider;
//! use placefinder::screen::{Action, LocationScreen};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let provider = Arc::new(IpLocationProvider::new());
//! let geocoder = Arc::new(OpenCageClient::new("https://api.opencagedata.com", "your-key"));
//! let mut screen = LocationScreen::new(provider, geocoder);
//!
//! screen.dispatch(Action::Mount);
//! screen.settle().await;
//! for line in screen.view().lines() {
//!     println!("{}", line);
//! }
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod location;
pub mod screen;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinate;
pub use error::{Error, Result};
pub use screen::{LocationScreen, ScreenState, View};
