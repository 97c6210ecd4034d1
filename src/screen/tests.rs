//! Location screen behaviour against stub collaborators

use super::*;
use crate::coord::Coordinate;
use crate::location::LocationError;
use crate::testing::{result, Reply, StubGeocoder, StubProvider};
use std::sync::Arc;
use std::time::Duration;

type TestScreen = LocationScreen<StubProvider, StubGeocoder>;

fn build(
    provider: StubProvider,
    geocoder: StubGeocoder,
) -> (TestScreen, Arc<StubProvider>, Arc<StubGeocoder>) {
    let provider = Arc::new(provider);
    let geocoder = Arc::new(geocoder);
    let screen = LocationScreen::new(Arc::clone(&provider), Arc::clone(&geocoder));
    (screen, provider, geocoder)
}

fn san_francisco() -> StubGeocoder {
    StubGeocoder::new().on_reverse(Reply::Results(vec![result(
        "San Francisco, CA",
        37.78,
        -122.41,
    )]))
}

async fn mounted(provider: StubProvider, geocoder: StubGeocoder) -> (TestScreen, Arc<StubGeocoder>) {
    let (mut screen, _, geocoder) = build(provider, geocoder);
    screen.dispatch(Action::Mount);
    assert!(screen.settle().await);
    (screen, geocoder)
}

async fn search(screen: &mut TestScreen, text: &str) {
    screen.dispatch(Action::SearchInputChanged(text.to_string()));
    screen.dispatch(Action::SubmitSearch);
    assert!(screen.settle().await);
}

#[tokio::test]
async fn test_mount_shows_position_and_place() {
    let (screen, geocoder) = mounted(StubProvider::at(37.78, -122.41), san_francisco()).await;

    assert_eq!(
        screen.view(),
        View::Results {
            coordinate: Some(Coordinate::new(37.78, -122.41)),
            place_name: Some("San Francisco, CA".to_string()),
        }
    );
    assert_eq!(
        screen.view().lines(),
        vec!["Latitude: 37.78", "Longitude: -122.41", "Place: San Francisco, CA"]
    );
    assert_eq!(geocoder.queries(), vec!["37.78,-122.41".to_string()]);
}

#[tokio::test]
async fn test_location_timeout_skips_geocoding() {
    let (screen, geocoder) = mounted(
        StubProvider::failing(LocationError::Timeout),
        StubGeocoder::new(),
    )
    .await;

    assert_eq!(
        screen.view(),
        View::Error {
            message: "Error getting location: Request timed out".to_string()
        }
    );
    assert!(!screen.state().is_loading);
    assert_eq!(geocoder.calls(), 0);
}

#[tokio::test]
async fn test_unknown_search_keeps_previous_place() {
    let geocoder = san_francisco().on_forward(Reply::Results(vec![]));
    let (mut screen, _) = mounted(StubProvider::at(37.78, -122.41), geocoder).await;

    search(&mut screen, "Nowhereville").await;

    assert_eq!(
        screen.view(),
        View::Error {
            message: "Place not found".to_string()
        }
    );
    assert_eq!(screen.state().coordinate, Some(Coordinate::new(37.78, -122.41)));
    assert_eq!(screen.state().place_name.as_deref(), Some("San Francisco, CA"));
}

#[tokio::test]
async fn test_empty_search_makes_no_call() {
    let (mut screen, geocoder) = mounted(StubProvider::at(37.78, -122.41), san_francisco()).await;
    let calls_after_mount = geocoder.calls();

    screen.dispatch(Action::SubmitSearch);

    assert_eq!(screen.in_flight(), 0);
    assert_eq!(geocoder.forward_calls(), 0);
    assert_eq!(geocoder.calls(), calls_after_mount);
    assert_eq!(
        screen.view(),
        View::Error {
            message: "Please enter a place name".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_search_before_anything_else_makes_no_call() {
    let (mut screen, provider, geocoder) = build(StubProvider::at(0.0, 0.0), StubGeocoder::new());

    screen.dispatch(Action::SubmitSearch);

    assert_eq!(geocoder.calls(), 0);
    assert_eq!(provider.calls(), 0);
    assert_eq!(
        screen.state().error_message.as_deref(),
        Some("Please enter a place name")
    );
}

#[tokio::test]
async fn test_reverse_failure_goes_to_place_name() {
    let geocoder = StubGeocoder::new().on_reverse(Reply::Fail("connection reset".to_string()));
    let (screen, _) = mounted(StubProvider::at(37.78, -122.41), geocoder).await;

    let state = screen.state();
    assert_eq!(state.place_name.as_deref(), Some("Error fetching place name"));
    assert!(!state.is_loading);
    assert_eq!(state.error_message, None);
    assert!(matches!(screen.view(), View::Results { .. }));
}

#[tokio::test]
async fn test_reverse_without_results() {
    let geocoder = StubGeocoder::new().on_reverse(Reply::Results(vec![]));
    let (screen, _) = mounted(StubProvider::at(1.0, 2.0), geocoder).await;

    assert_eq!(screen.state().place_name.as_deref(), Some("Place name not found"));
    assert_eq!(screen.state().error_message, None);
}

#[tokio::test]
async fn test_reverse_uses_first_result_only() {
    let geocoder = StubGeocoder::new().on_reverse(Reply::Results(vec![
        result("Exact street address", 1.0, 2.0),
        result("Broader city", 1.1, 2.1),
    ]));
    let (screen, _) = mounted(StubProvider::at(1.0, 2.0), geocoder).await;

    assert_eq!(screen.state().place_name.as_deref(), Some("Exact street address"));
    assert_eq!(screen.state().coordinate, Some(Coordinate::new(1.0, 2.0)));
}

#[tokio::test]
async fn test_search_moves_screen_and_dismisses_keyboard() {
    let geocoder = san_francisco().on_forward(Reply::Results(vec![
        result("Paris, France", 48.8566, 2.3522),
        result("Paris, Texas", 33.6609, -95.5555),
    ]));
    let (mut screen, _, geocoder) = build(StubProvider::at(37.78, -122.41), geocoder);
    let mut ui = screen.ui_events();
    screen.dispatch(Action::Mount);
    assert!(screen.settle().await);

    search(&mut screen, "Paris & more").await;

    assert_eq!(
        screen.view(),
        View::Results {
            coordinate: Some(Coordinate::new(48.8566, 2.3522)),
            place_name: Some("Paris, France".to_string()),
        }
    );
    assert_eq!(ui.try_recv().ok(), Some(UiEvent::DismissKeyboard));
    assert!(ui.try_recv().is_err());
    assert_eq!(geocoder.queries().last().map(String::as_str), Some("Paris & more"));
}

#[tokio::test]
async fn test_search_clears_previous_error() {
    let geocoder = StubGeocoder::new().on_forward(Reply::Results(vec![result("Oslo, Norway", 59.91, 10.75)]));
    let (mut screen, _) = mounted(StubProvider::failing(LocationError::Timeout), geocoder).await;
    assert!(matches!(screen.view(), View::Error { .. }));

    search(&mut screen, "Oslo").await;

    assert_eq!(screen.state().error_message, None);
    assert_eq!(screen.state().place_name.as_deref(), Some("Oslo, Norway"));
}

#[tokio::test]
async fn test_search_failure_sets_error() {
    let geocoder = san_francisco().on_forward(Reply::Fail("503".to_string()));
    let (mut screen, _) = mounted(StubProvider::at(37.78, -122.41), geocoder).await;

    search(&mut screen, "Paris").await;

    assert_eq!(
        screen.view(),
        View::Error {
            message: "Error fetching place coordinates".to_string()
        }
    );
    assert_eq!(screen.state().place_name.as_deref(), Some("San Francisco, CA"));
}

#[tokio::test]
async fn test_failed_search_does_not_dismiss_keyboard() {
    let geocoder = StubGeocoder::new().on_forward(Reply::Results(vec![]));
    let (mut screen, _, _) = build(StubProvider::at(0.0, 0.0), geocoder);
    let mut ui = screen.ui_events();

    search(&mut screen, "Nowhereville").await;

    assert!(ui.try_recv().is_err());
}

#[tokio::test]
async fn test_refresh_shows_spinner_then_settles() {
    let geocoder = san_francisco().on_reverse(Reply::Results(vec![result("Oakland, CA", 37.8, -122.27)]));
    let provider = StubProvider::new([
        Ok(Coordinate::new(37.78, -122.41)),
        Ok(Coordinate::new(37.8, -122.27)),
    ]);
    let (mut screen, _) = mounted(provider, geocoder).await;

    screen.dispatch(Action::Refresh);
    assert_eq!(screen.view(), View::Loading);

    assert!(screen.settle().await);
    assert_eq!(screen.state().coordinate, Some(Coordinate::new(37.8, -122.27)));
    assert_eq!(screen.state().place_name.as_deref(), Some("Oakland, CA"));
    assert!(!screen.state().is_loading);
}

#[tokio::test]
async fn test_refresh_twice_matches_refresh_once() {
    let geocoder = san_francisco()
        .on_reverse(Reply::Results(vec![result("San Francisco, CA", 37.78, -122.41)]))
        .on_reverse(Reply::Results(vec![result("San Francisco, CA", 37.78, -122.41)]));
    let (mut screen, _) = mounted(StubProvider::at(37.78, -122.41), geocoder).await;

    screen.dispatch(Action::Refresh);
    assert!(screen.settle().await);
    let once = screen.state().clone();

    screen.dispatch(Action::Refresh);
    assert!(screen.settle().await);

    assert_eq!(screen.state(), &once);
}

#[tokio::test]
async fn test_refresh_recovers_from_location_error() {
    let provider = StubProvider::new([
        Err(LocationError::Unavailable("Location services disabled".to_string())),
        Ok(Coordinate::new(37.78, -122.41)),
    ]);
    let (mut screen, _) = mounted(provider, san_francisco()).await;
    assert_eq!(
        screen.state().error_message.as_deref(),
        Some("Error getting location: Location services disabled")
    );

    screen.dispatch(Action::Refresh);
    assert!(screen.settle().await);

    assert_eq!(screen.state().error_message, None);
    assert_eq!(screen.state().place_name.as_deref(), Some("San Francisco, CA"));
}

#[tokio::test]
async fn test_loading_never_stuck() {
    let cases: Vec<(StubProvider, StubGeocoder)> = vec![
        (StubProvider::at(1.0, 2.0), san_francisco()),
        (StubProvider::at(1.0, 2.0), StubGeocoder::new().on_reverse(Reply::Fail("x".to_string()))),
        (StubProvider::at(1.0, 2.0), StubGeocoder::new().on_reverse(Reply::Results(vec![]))),
        (StubProvider::failing(LocationError::Timeout), StubGeocoder::new()),
    ];

    for (provider, geocoder) in cases {
        let (mut screen, _) = mounted(provider, geocoder).await;
        assert!(!screen.state().is_loading);

        screen.dispatch(Action::Refresh);
        assert!(screen.settle().await);
        assert!(!screen.state().is_loading);

        search(&mut screen, "anywhere").await;
        assert!(!screen.state().is_loading);
    }
}

#[tokio::test]
async fn test_search_without_mount_settles_loading() {
    let geocoder = StubGeocoder::new().on_forward(Reply::Results(vec![result("Lima, Peru", -12.05, -77.04)]));
    let (mut screen, provider, _) = build(StubProvider::at(0.0, 0.0), geocoder);

    search(&mut screen, "Lima").await;

    assert_eq!(provider.calls(), 0);
    assert!(!screen.state().is_loading);
    assert_eq!(screen.state().coordinate, Some(Coordinate::new(-12.05, -77.04)));
}

/// Slow mount-time reverse lookup racing a fast search
async fn race(policy: StalePolicy) -> ScreenState {
    let geocoder = san_francisco()
        .gated()
        .on_forward(Reply::Results(vec![result("Paris, France", 48.8566, 2.3522)]));
    let (screen, _, geocoder) = build(StubProvider::at(37.78, -122.41), geocoder);
    let mut screen = screen.with_policy(policy);

    screen.dispatch(Action::Mount);
    // Position arrives; the reverse lookup is now held at the gate
    assert!(screen.step().await);
    assert_eq!(screen.in_flight(), 1);

    screen.dispatch(Action::SearchInputChanged("Paris".to_string()));
    screen.dispatch(Action::SubmitSearch);
    // Only the search can complete while the gate is closed
    assert!(screen.step().await);
    assert_eq!(screen.state().place_name.as_deref(), Some("Paris, France"));

    geocoder.open_reverse_gate();
    assert!(screen.settle().await);
    screen.state().clone()
}

#[tokio::test]
async fn test_stale_reverse_lookup_is_discarded() {
    let state = race(StalePolicy::LatestRequestWins).await;

    assert_eq!(state.coordinate, Some(Coordinate::new(48.8566, 2.3522)));
    assert_eq!(state.place_name.as_deref(), Some("Paris, France"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_last_writer_wins_overwrites_search() {
    let state = race(StalePolicy::LastWriterWins).await;

    // Coordinate from the search, place name from the late reverse lookup
    assert_eq!(state.coordinate, Some(Coordinate::new(48.8566, 2.3522)));
    assert_eq!(state.place_name.as_deref(), Some("San Francisco, CA"));
}

#[tokio::test]
async fn test_unfound_search_keeps_refreshed_place() {
    let geocoder = san_francisco()
        .gated()
        .on_reverse(Reply::Results(vec![result("Oakland, CA", 37.8, -122.27)]))
        .on_forward(Reply::Results(vec![]));
    let provider = StubProvider::new([
        Ok(Coordinate::new(37.78, -122.41)),
        Ok(Coordinate::new(37.8, -122.27)),
    ]);
    let (mut screen, _, geocoder) = build(provider, geocoder);

    screen.dispatch(Action::Mount);
    assert!(screen.step().await);
    geocoder.open_reverse_gate();
    assert!(screen.settle().await);
    assert_eq!(screen.state().place_name.as_deref(), Some("San Francisco, CA"));

    screen.dispatch(Action::Refresh);
    // New position applied; its reverse lookup waits at the gate
    assert!(screen.step().await);
    assert_eq!(screen.state().coordinate, Some(Coordinate::new(37.8, -122.27)));

    screen.dispatch(Action::SearchInputChanged("Nowhereville".to_string()));
    screen.dispatch(Action::SubmitSearch);
    assert!(screen.step().await);
    assert_eq!(screen.state().error_message.as_deref(), Some("Place not found"));

    geocoder.open_reverse_gate();
    assert!(screen.settle().await);

    let state = screen.state();
    assert_eq!(state.coordinate, Some(Coordinate::new(37.8, -122.27)));
    assert_eq!(state.place_name.as_deref(), Some("Oakland, CA"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_handle_drives_running_screen() {
    let geocoder = san_francisco().on_forward(Reply::Results(vec![result("Rome, Italy", 41.9, 12.5)]));
    let (screen, _, _) = build(StubProvider::at(37.78, -122.41), geocoder);
    let handle = screen.handle();
    let mut updates = handle.subscribe();
    let task = tokio::spawn(screen.run());

    tokio::time::timeout(
        Duration::from_secs(5),
        updates.wait_for(|s| !s.is_loading && s.place_name.is_some()),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(handle.state().place_name.as_deref(), Some("San Francisco, CA"));

    handle.search("Rome").unwrap();
    tokio::time::timeout(
        Duration::from_secs(5),
        updates.wait_for(|s| s.place_name.as_deref() == Some("Rome, Italy")),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(handle.state().search_input, "Rome");

    handle.unmount().unwrap();
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_from_config_applies_settings() {
    let mut config = crate::config::Config::default();
    config.screen.discard_stale_responses = false;
    config.location.timeout_ms = 250;

    let screen = LocationScreen::from_config(
        Arc::new(StubProvider::at(0.0, 0.0)),
        Arc::new(StubGeocoder::new()),
        &config,
    );

    assert_eq!(screen.policy(), StalePolicy::LastWriterWins);
    assert_eq!(screen.options().timeout, Duration::from_millis(250));
    assert_eq!(screen.options().maximum_age, Duration::from_secs(10));
    assert!(screen.options().enable_high_accuracy);
    assert_eq!(screen.view(), View::Loading);
    assert_eq!(screen.in_flight(), 0);
}
