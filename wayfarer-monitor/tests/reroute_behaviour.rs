//! Behavioural coverage for reroute decisions during navigation.

use std::cell::RefCell;
use std::time::SystemTime;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};
use wayfarer_core::test_support::{
    StubPathSource, StubPoiSource, StubTrafficSource, StubWeatherSource, candidate,
};
use wayfarer_core::{
    Alert, CandidateRoute, EventKind, Severity, TrafficEvent, TrafficSnapshot, WeatherCategory,
    WeatherReading,
};
use wayfarer_monitor::{
    NavigationSession, Notification, RerouteReason, RerouteSuggestion, SessionConfig,
    SessionError,
};

type Session = NavigationSession<StubPathSource, StubTrafficSource, StubWeatherSource, StubPoiSource>;

const DESTINATION: Coord<f64> = Coord { x: 0.09, y: 0.0 };

/// Shared state for reroute scenarios.
pub struct World {
    runtime: Runtime,
    offered: RefCell<Vec<CandidateRoute>>,
    session: RefCell<Option<Session>>,
    seen: RefCell<Vec<Notification>>,
    outcome: RefCell<Option<Result<Option<RerouteSuggestion>, SessionError>>>,
}

#[fixture]
/// Build a world with its own paused runtime.
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
pub fn world() -> World {
    World {
        runtime: Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .expect("failed to build Tokio runtime"),
        offered: RefCell::new(Vec::new()),
        session: RefCell::new(None),
        seen: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
    }
}

fn severe_accident() -> Alert {
    let event = TrafficEvent {
        id: "acc-7".into(),
        kind: EventKind::Accident,
        severity: Severity::Severe,
        location: Coord { x: 0.02, y: 0.0 },
        road_name: "Ring Road".into(),
        delay_minutes: 25,
        first_seen_at: SystemTime::UNIX_EPOCH,
    };
    Alert::for_event(event, true, SystemTime::UNIX_EPOCH)
}

#[given("the planner offers a route taking {secs} seconds")]
fn planner_offers(world: &World, secs: u64) {
    world
        .offered
        .borrow_mut()
        .push(candidate("alternative", 9_000.0, secs));
}

#[given("navigation has started along a route taking {secs} seconds")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn navigation_started(world: &World, secs: u64) {
    let session = NavigationSession::new(
        StubPathSource::with_routes(world.offered.take()),
        StubTrafficSource::with_snapshot(TrafficSnapshot::default()),
        StubWeatherSource::with_reading(WeatherReading::new("clear", 18.0, 1)),
        StubPoiSource::default(),
        SessionConfig::default(),
    );
    let current = candidate("current", 10_000.0, secs);
    world
        .runtime
        .block_on(session.start_navigation_with_route(DESTINATION, &current))
        .expect("navigation starts");
    *world.session.borrow_mut() = Some(session);
}

#[when("a severe accident is reported on the route")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn accident_reported(world: &World) {
    let session_slot = world.session.borrow();
    let session = session_slot.as_ref().expect("navigation started");
    let mut notifications = session.subscribe();
    let outcome = world
        .runtime
        .block_on(session.handle_alert(severe_accident()));
    *world.outcome.borrow_mut() = Some(outcome);
    while let Ok(notification) = notifications.try_recv() {
        world.seen.borrow_mut().push(notification);
    }
}

#[when("navigation stops")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn navigation_stops(world: &World) {
    world
        .session
        .borrow()
        .as_ref()
        .expect("navigation started")
        .stop_navigation();
}

#[then("the traveller is told about the accident")]
fn told_about_accident(world: &World) {
    assert!(matches!(
        world.seen.borrow().first(),
        Some(Notification::TrafficAlert(alert)) if alert.event.id == "acc-7"
    ));
}

#[then("a reroute saving {minutes} minutes is suggested")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn reroute_suggested(world: &World, minutes: u64) {
    let suggestion = world
        .outcome
        .borrow()
        .clone()
        .expect("alert handled")
        .expect("evaluation succeeded")
        .expect("a suggestion");
    assert_eq!(suggestion.minutes_saved, minutes);
    assert_eq!(
        suggestion.reason,
        RerouteReason::Traffic {
            event_id: "acc-7".into()
        }
    );
    assert!(
        world
            .seen
            .borrow()
            .iter()
            .any(|seen| matches!(seen, Notification::RerouteSuggested(_)))
    );
}

#[then("no reroute is suggested")]
fn no_reroute(world: &World) {
    assert_eq!(world.outcome.borrow().clone(), Some(Ok(None)));
    assert_eq!(world.seen.borrow().len(), 1);
}

#[then("traffic monitoring has stopped")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn monitoring_stopped(world: &World) {
    let session_slot = world.session.borrow();
    let session = session_slot.as_ref().expect("navigation started");
    assert!(!session.is_navigating());
    assert!(!session.monitor().is_active());
}

#[then("reroute evaluation reports that no navigation is active")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn evaluation_refused(world: &World) {
    let session_slot = world.session.borrow();
    let session = session_slot.as_ref().expect("navigation started");
    let outcome = world.runtime.block_on(
        session.evaluate_reroute(RerouteReason::Weather(WeatherCategory::Rain)),
    );
    assert_eq!(outcome, Err(SessionError::NotActive));
}

#[scenario(path = "tests/features/reroute.feature", index = 0)]
fn severe_accident_reroutes(world: World) {
    let _ = world;
}

#[scenario(path = "tests/features/reroute.feature", index = 1)]
fn marginal_gain_ignored(world: World) {
    let _ = world;
}

#[scenario(path = "tests/features/reroute.feature", index = 2)]
fn stopping_navigation(world: World) {
    let _ = world;
}
