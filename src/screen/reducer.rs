//! Actions, effects and the screen reducer
//!
//! `Screen::update` applies an action to the state and returns the effects
//! the driver has to run. It never performs I/O itself.

use crate::coord::Coordinate;
use crate::geo::GeocodeResult;
use crate::location::LocationError;
use crate::screen::state::ScreenState;
use tracing::debug;

/// Identifies one mount, refresh or search request
///
/// Tokens increase monotonically. A reverse lookup carries the token of the
/// mount or refresh that triggered it. Staleness is judged per slice of the
/// state: a search that finds nothing never touches the coordinate or place
/// name, so it does not supersede a pending reverse lookup.
pub type RequestToken = u64;

/// Something that happened to the screen
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Screen became visible
    Mount,
    /// Refresh button pressed
    Refresh,
    /// Search text edited
    SearchInputChanged(String),
    /// Change-location button pressed or Enter in the search field
    SubmitSearch,
    /// Screen torn down
    Unmount,

    PositionResolved {
        token: RequestToken,
        result: Result<Coordinate, LocationError>,
    },
    /// Reverse lookup finished; the error text is the logged cause
    ReverseGeocoded {
        token: RequestToken,
        result: Result<Vec<GeocodeResult>, String>,
    },
    /// Forward lookup finished; the error text is the logged cause
    ForwardGeocoded {
        token: RequestToken,
        result: Result<Vec<GeocodeResult>, String>,
    },
}

impl Action {
    /// Whether this action reports the end of an effect
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Action::PositionResolved { .. }
                | Action::ReverseGeocoded { .. }
                | Action::ForwardGeocoded { .. }
        )
    }
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestPosition { token: RequestToken },
    ReverseGeocode { token: RequestToken, coordinate: Coordinate },
    ForwardGeocode { token: RequestToken, query: String },
    DismissKeyboard,
}

/// How completions of superseded requests are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Every completion is applied; whichever arrives last wins
    LastWriterWins,
    /// Only completions for the newest request are applied
    #[default]
    LatestRequestWins,
}

impl StalePolicy {
    /// Policy for the `screen.discard_stale_responses` setting
    pub fn from_discard_stale(discard: bool) -> Self {
        if discard {
            Self::LatestRequestWins
        } else {
            Self::LastWriterWins
        }
    }
}

/// Location screen reducer
#[derive(Debug, Default)]
pub struct Screen {
    state: ScreenState,
    latest: RequestToken,
    /// Newest request allowed to write the coordinate and place name
    place: RequestToken,
    /// Newest search request
    search: RequestToken,
    policy: StalePolicy,
}

impl Screen {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            state: ScreenState::default(),
            latest: 0,
            place: 0,
            search: 0,
            policy,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Token of the newest request
    pub fn latest_token(&self) -> RequestToken {
        self.latest
    }

    fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        self.latest
    }

    fn accepts(&self, action: &Action) -> bool {
        if self.policy == StalePolicy::LastWriterWins {
            return true;
        }
        match action {
            Action::PositionResolved { token, .. } | Action::ReverseGeocoded { token, .. } => {
                *token == self.place
            }
            // A found place also has to be newer than any mount or refresh
            Action::ForwardGeocoded {
                token,
                result: Ok(results),
            } if !results.is_empty() => *token == self.search && *token > self.place,
            Action::ForwardGeocoded { token, .. } => *token == self.search,
            _ => true,
        }
    }

    fn transition(&mut self, f: impl FnOnce(ScreenState) -> ScreenState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    /// Apply `action` and return the effects to run
    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        if !self.accepts(&action) {
            debug!(
                "Dropping stale {:?} (place request {}, search request {})",
                action, self.place, self.search
            );
            return Vec::new();
        }

        match action {
            Action::Mount => {
                self.place = self.issue();
                vec![Effect::RequestPosition { token: self.place }]
            }

            Action::Refresh => {
                self.transition(ScreenState::loading);
                self.place = self.issue();
                vec![Effect::RequestPosition { token: self.place }]
            }

            Action::SearchInputChanged(text) => {
                self.transition(|s| s.with_input(text));
                Vec::new()
            }

            Action::SubmitSearch => {
                if self.state.search_input.is_empty() {
                    self.transition(ScreenState::with_empty_search);
                    return Vec::new();
                }
                let query = self.state.search_input.clone();
                self.search = self.issue();
                vec![Effect::ForwardGeocode {
                    token: self.search,
                    query,
                }]
            }

            Action::Unmount => Vec::new(),

            Action::PositionResolved { token, result } => match result {
                Ok(coordinate) => {
                    self.transition(|s| s.with_position(coordinate));
                    vec![Effect::ReverseGeocode { token, coordinate }]
                }
                Err(e) => {
                    let detail = e.to_string();
                    self.transition(|s| s.with_location_error(&detail));
                    Vec::new()
                }
            },

            Action::ReverseGeocoded { result, .. } => {
                match result {
                    Ok(results) => self.transition(|s| s.with_reverse_results(&results)),
                    Err(_) => self.transition(ScreenState::with_reverse_failure),
                }
                Vec::new()
            }

            Action::ForwardGeocoded { token, result } => match result {
                Ok(results) if !results.is_empty() => {
                    self.place = self.place.max(token);
                    self.transition(|s| s.with_search_results(&results));
                    vec![Effect::DismissKeyboard]
                }
                Ok(results) => {
                    self.transition(|s| s.with_search_results(&results));
                    Vec::new()
                }
                Err(_) => {
                    self.transition(ScreenState::with_search_failure);
                    Vec::new()
                }
            },
        }
    }
}
