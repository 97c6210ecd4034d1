//! Test doubles shared by the unit tests
//!
//! Stub providers and geocoders count their calls and can be held at a gate
//! so tests decide the order in which responses arrive.

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::geo::{GeocodeResult, GeocodingService, Geometry};
use crate::location::{LocationError, LocationProvider, Position, PositionOptions};
use axum::Router;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Serve `router` on an ephemeral localhost port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Build a geocoder result
pub fn result(formatted: &str, lat: f64, lng: f64) -> GeocodeResult {
    GeocodeResult {
        formatted: formatted.to_string(),
        geometry: Geometry { lat, lng },
    }
}

/// Provider answering from a script, one entry per call
///
/// The last entry repeats once the script runs out.
pub struct StubProvider {
    script: Mutex<VecDeque<std::result::Result<Coordinate, LocationError>>>,
    last: Mutex<Option<std::result::Result<Coordinate, LocationError>>>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(
        script: impl IntoIterator<Item = std::result::Result<Coordinate, LocationError>>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new([Ok(Coordinate::new(latitude, longitude))])
    }

    pub fn failing(error: LocationError) -> Self {
        Self::new([Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> std::result::Result<Coordinate, LocationError> {
        let mut last = self.last.lock().unwrap();
        if let Some(entry) = self.script.lock().unwrap().pop_front() {
            *last = Some(entry);
        }
        last.clone()
            .unwrap_or_else(|| Err(LocationError::Unavailable("empty script".to_string())))
    }
}

impl LocationProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next().map(Position::now)
    }
}

/// Scripted reply for one geocoder call
pub enum Reply {
    Results(Vec<GeocodeResult>),
    Fail(String),
}

impl Reply {
    fn into_result(self) -> Result<Vec<GeocodeResult>> {
        match self {
            Reply::Results(results) => Ok(results),
            Reply::Fail(message) => Err(Error::Geocoding(message)),
        }
    }
}

/// Geocoder answering from separate reverse and forward scripts
pub struct StubGeocoder {
    reverse: Mutex<VecDeque<Reply>>,
    forward: Mutex<VecDeque<Reply>>,
    reverse_calls: AtomicUsize,
    forward_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    /// When set, reverse lookups wait here before answering
    reverse_gate: Option<Notify>,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self {
            reverse: Mutex::new(VecDeque::new()),
            forward: Mutex::new(VecDeque::new()),
            reverse_calls: AtomicUsize::new(0),
            forward_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            reverse_gate: None,
        }
    }

    pub fn on_reverse(self, reply: Reply) -> Self {
        self.reverse.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_forward(self, reply: Reply) -> Self {
        self.forward.lock().unwrap().push_back(reply);
        self
    }

    /// Hold every reverse lookup until `open_reverse_gate` is called
    pub fn gated(mut self) -> Self {
        self.reverse_gate = Some(Notify::new());
        self
    }

    pub fn open_reverse_gate(&self) {
        if let Some(gate) = &self.reverse_gate {
            gate.notify_one();
        }
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reverse_calls() + self.forward_calls()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl GeocodingService for StubGeocoder {
    async fn reverse(&self, coordinate: Coordinate) -> Result<Vec<GeocodeResult>> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(coordinate.to_query());
        if let Some(gate) = &self.reverse_gate {
            gate.notified().await;
        }
        let reply = self.reverse.lock().unwrap().pop_front();
        reply.map(Reply::into_result).unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn forward(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        self.forward_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        let reply = self.forward.lock().unwrap().pop_front();
        reply.map(Reply::into_result).unwrap_or_else(|| Ok(Vec::new()))
    }
}
