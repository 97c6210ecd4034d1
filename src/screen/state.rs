//! Screen state and its transitions
//!
//! Every transition consumes the current state and returns a fully specified
//! new one, so a half-applied update can never be observed.

use crate::constants::messages;
use crate::coord::Coordinate;
use crate::geo::GeocodeResult;
use serde::{Deserialize, Serialize};

/// Everything the location screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenState {
    /// Last known coordinate, from the provider or a search
    pub coordinate: Option<Coordinate>,
    /// Place name or an informational message about it
    pub place_name: Option<String>,
    /// Error shown instead of the results
    pub error_message: Option<String>,
    pub is_loading: bool,
    /// Free text owned by the user
    pub search_input: String,
}

impl Default for ScreenState {
    /// A freshly mounted screen is loading
    fn default() -> Self {
        Self {
            coordinate: None,
            place_name: None,
            error_message: None,
            is_loading: true,
            search_input: String::new(),
        }
    }
}

/// What the results area shows
///
/// Loading wins over an error, and an error wins over results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum View {
    Loading,
    Error {
        message: String,
    },
    Results {
        coordinate: Option<Coordinate>,
        place_name: Option<String>,
    },
}

impl View {
    /// Text lines of the results area
    pub fn lines(&self) -> Vec<String> {
        match self {
            View::Loading => vec![messages::LOADING.to_string()],
            View::Error { message } => vec![message.clone()],
            View::Results {
                coordinate,
                place_name,
            } => {
                let (lat, lng) = match coordinate {
                    Some(c) => (c.latitude.to_string(), c.longitude.to_string()),
                    None => (String::new(), String::new()),
                };
                vec![
                    format!("Latitude: {}", lat),
                    format!("Longitude: {}", lng),
                    format!("Place: {}", place_name.as_deref().unwrap_or_default()),
                ]
            }
        }
    }
}

impl ScreenState {
    /// Derive the render mode
    pub fn view(&self) -> View {
        if self.is_loading {
            View::Loading
        } else if let Some(message) = &self.error_message {
            View::Error {
                message: message.clone(),
            }
        } else {
            View::Results {
                coordinate: self.coordinate,
                place_name: self.place_name.clone(),
            }
        }
    }

    /// Show the spinner until the next settle
    pub fn loading(self) -> Self {
        Self {
            is_loading: true,
            ..self
        }
    }

    /// Replace the search text
    pub fn with_input(self, search_input: String) -> Self {
        Self {
            search_input,
            ..self
        }
    }

    /// A position arrived; the place name follows from the reverse lookup
    pub fn with_position(self, coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            error_message: None,
            ..self
        }
    }

    /// The provider failed with `detail`
    pub fn with_location_error(self, detail: &str) -> Self {
        Self {
            error_message: Some(format!("{}{}", messages::LOCATION_ERROR_PREFIX, detail)),
            is_loading: false,
            ..self
        }
    }

    /// The reverse lookup answered; only the first match counts
    pub fn with_reverse_results(self, results: &[GeocodeResult]) -> Self {
        let place_name = match results.first() {
            Some(first) => first.formatted.clone(),
            None => messages::PLACE_NAME_NOT_FOUND.to_string(),
        };
        Self {
            place_name: Some(place_name),
            is_loading: false,
            ..self
        }
    }

    /// The reverse lookup failed
    ///
    /// Reported through the place name, not the error message.
    pub fn with_reverse_failure(self) -> Self {
        Self {
            place_name: Some(messages::PLACE_NAME_ERROR.to_string()),
            is_loading: false,
            ..self
        }
    }

    /// The forward lookup answered; only the first match counts
    pub fn with_search_results(self, results: &[GeocodeResult]) -> Self {
        match results.first() {
            Some(first) => Self {
                coordinate: Some(first.geometry.into()),
                place_name: Some(first.formatted.clone()),
                error_message: None,
                is_loading: false,
                ..self
            },
            None => Self {
                error_message: Some(messages::PLACE_NOT_FOUND.to_string()),
                is_loading: false,
                ..self
            },
        }
    }

    /// The forward lookup failed
    pub fn with_search_failure(self) -> Self {
        Self {
            error_message: Some(messages::PLACE_COORDINATES_ERROR.to_string()),
            is_loading: false,
            ..self
        }
    }

    /// Search submitted with nothing typed
    pub fn with_empty_search(self) -> Self {
        Self {
            error_message: Some(messages::EMPTY_SEARCH.to_string()),
            ..self
        }
    }
}
