//! The location screen
//!
//! Shows the current coordinate and place name, and lets the user refresh
//! the position or search for another place.
//!
//! ## Flow
//! - Mount: ask the location provider for a position, then reverse geocode it
//! - Refresh: show the spinner and repeat the mount flow
//! - Search: forward geocode the typed text
//!
//! State changes go through [`reducer::Screen`]; I/O runs in
//! [`driver::LocationScreen`].

pub mod driver;
pub mod reducer;
pub mod state;

#[cfg(test)]
mod tests;

pub use driver::{LocationScreen, ScreenHandle, UiEvent};
pub use reducer::{Action, Effect, RequestToken, Screen, StalePolicy};
pub use state::{ScreenState, View};
