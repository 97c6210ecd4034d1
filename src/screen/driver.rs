//! Screen driver
//!
//! Runs the reducer on a single event loop. Effects execute on their own
//! tokio tasks and post their completion back into the loop as actions, so
//! overlapping operations never block one another.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::GeocodingService;
use crate::location::{LocationProvider, PositionOptions};
use crate::screen::reducer::{Action, Effect, Screen, StalePolicy};
use crate::screen::state::{ScreenState, View};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, warn};

/// UI side effects the shell should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Hide the on-screen keyboard / leave the search field
    DismissKeyboard,
}

/// Cloneable handle for shells to drive a running screen
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    actions: mpsc::UnboundedSender<Action>,
    state: watch::Receiver<ScreenState>,
}

impl ScreenHandle {
    fn send(&self, action: Action) -> Result<()> {
        self.actions.send(action).map_err(|_| Error::ScreenClosed)
    }

    pub fn mount(&self) -> Result<()> {
        self.send(Action::Mount)
    }

    pub fn refresh(&self) -> Result<()> {
        self.send(Action::Refresh)
    }

    pub fn set_input(&self, text: impl Into<String>) -> Result<()> {
        self.send(Action::SearchInputChanged(text.into()))
    }

    pub fn submit(&self) -> Result<()> {
        self.send(Action::SubmitSearch)
    }

    /// Replace the search text and submit it
    pub fn search(&self, text: impl Into<String>) -> Result<()> {
        self.set_input(text)?;
        self.submit()
    }

    pub fn unmount(&self) -> Result<()> {
        self.send(Action::Unmount)
    }

    /// Latest published state
    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.clone()
    }
}

/// The location screen: reducer plus the collaborators its effects need
pub struct LocationScreen<P, G> {
    screen: Screen,
    provider: Arc<P>,
    geocoder: Arc<G>,
    options: PositionOptions,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    published: watch::Sender<ScreenState>,
    ui_events: Option<mpsc::UnboundedSender<UiEvent>>,
    in_flight: usize,
}

impl<P, G> LocationScreen<P, G>
where
    P: LocationProvider + 'static,
    G: GeocodingService + 'static,
{
    /// Create an unmounted screen with default position options
    pub fn new(provider: Arc<P>, geocoder: Arc<G>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = Screen::new(StalePolicy::default());
        let (published, _) = watch::channel(screen.state().clone());

        Self {
            screen,
            provider,
            geocoder,
            options: PositionOptions::default(),
            tx,
            rx,
            published,
            ui_events: None,
            in_flight: 0,
        }
    }

    /// Create an unmounted screen using the `[location]` and `[screen]` settings
    pub fn from_config(provider: Arc<P>, geocoder: Arc<G>, config: &Config) -> Self {
        Self::new(provider, geocoder)
            .with_options(config.position_options())
            .with_policy(StalePolicy::from_discard_stale(
                config.screen.discard_stale_responses,
            ))
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.screen = Screen::new(policy);
        self.publish();
        self
    }

    /// Receive UI side effects such as keyboard dismissal
    pub fn ui_events(&mut self) -> mpsc::UnboundedReceiver<UiEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.ui_events = Some(tx);
        rx
    }

    pub fn handle(&self) -> ScreenHandle {
        ScreenHandle {
            actions: self.tx.clone(),
            state: self.published.subscribe(),
        }
    }

    pub fn state(&self) -> &ScreenState {
        self.screen.state()
    }

    pub fn view(&self) -> View {
        self.screen.state().view()
    }

    pub fn policy(&self) -> StalePolicy {
        self.screen.policy()
    }

    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// Number of effects still running
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn publish(&self) {
        self.published.send_replace(self.screen.state().clone());
    }

    /// Apply one action and start the effects it asks for
    pub fn dispatch(&mut self, action: Action) {
        if action.is_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        debug!("Dispatching {:?}", action);

        let effects = self.screen.update(action);
        self.publish();

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let tx = self.tx.clone();

        match effect {
            Effect::RequestPosition { token } => {
                self.in_flight += 1;
                let provider = Arc::clone(&self.provider);
                let options = self.options;
                tokio::spawn(async move {
                    let result = provider
                        .current_position(&options)
                        .await
                        .map(|position| position.coordinate);
                    if let Err(e) = &result {
                        warn!("Error getting location from {}: {}", provider.name(), e);
                    }
                    let _ = tx.send(Action::PositionResolved { token, result });
                });
            }

            Effect::ReverseGeocode { token, coordinate } => {
                self.in_flight += 1;
                let geocoder = Arc::clone(&self.geocoder);
                tokio::spawn(async move {
                    let result = geocoder.reverse(coordinate).await.map_err(|e| {
                        error!("Error fetching place name: {}", e);
                        e.to_string()
                    });
                    let _ = tx.send(Action::ReverseGeocoded { token, result });
                });
            }

            Effect::ForwardGeocode { token, query } => {
                self.in_flight += 1;
                let geocoder = Arc::clone(&self.geocoder);
                tokio::spawn(async move {
                    let result = geocoder.forward(&query).await.map_err(|e| {
                        error!("Error fetching place coordinates: {}", e);
                        e.to_string()
                    });
                    let _ = tx.send(Action::ForwardGeocoded { token, result });
                });
            }

            Effect::DismissKeyboard => {
                if let Some(ui) = &self.ui_events {
                    let _ = ui.send(UiEvent::DismissKeyboard);
                }
            }
        }
    }

    /// Wait for the next action and apply it
    ///
    /// Returns false once the screen has been unmounted.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(Action::Unmount) | None => false,
            Some(action) => {
                self.dispatch(action);
                true
            }
        }
    }

    /// Keep applying actions until no effect is running
    ///
    /// Returns false if the screen was unmounted meanwhile.
    pub async fn settle(&mut self) -> bool {
        while self.in_flight > 0 {
            if !self.step().await {
                return false;
            }
        }
        true
    }

    /// Mount and serve actions until unmounted
    pub async fn run(mut self) {
        self.dispatch(Action::Mount);
        while self.step().await {}
        debug!("Location screen unmounted");
    }
}
