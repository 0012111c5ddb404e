//! Deterministic collaborator doubles used by unit and behaviour tests.
//!
//! Each stub replays scripted responses in order and then keeps returning the
//! last one, so tests can describe a sequence of polls without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, Rect};

use crate::{
    CandidateRoute, CollaboratorError, PathSource, PoiCategory, PoiSource, PointOfInterest,
    RoadCondition, RouteStrategy, TrafficSnapshot, TrafficSource, TravelMode, WeatherReading,
    WeatherSource,
};

/// Replays scripted responses, repeating the final one once exhausted.
#[derive(Debug)]
struct Script<T> {
    queue: Mutex<VecDeque<Result<T, CollaboratorError>>>,
    last: Mutex<Result<T, CollaboratorError>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(first: Result<T, CollaboratorError>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            last: Mutex::new(first),
            calls: AtomicUsize::new(0),
        }
    }

    fn sequence(
        responses: Vec<Result<T, CollaboratorError>>,
        fallback: Result<T, CollaboratorError>,
    ) -> Self {
        Self {
            queue: Mutex::new(responses.into_iter().collect()),
            last: Mutex::new(fallback),
            calls: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Result<T, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(response) = queue.pop_front() {
            *last = response;
        }
        last.clone()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Build a straight two-point candidate route.
///
/// The polyline runs east from the origin by `distance_m` metres along the
/// equator.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "test geometry converts metres to degrees"
)]
pub fn candidate(id: &str, distance_m: f64, duration_secs: u64) -> CandidateRoute {
    let degrees = distance_m / crate::EARTH_RADIUS_M.to_radians();
    CandidateRoute::new(
        id,
        distance_m,
        Duration::from_secs(duration_secs),
        vec![Coord { x: 0.0, y: 0.0 }, Coord { x: degrees, y: 0.0 }],
    )
}

/// Build a road condition at `(x, y)`.
#[must_use]
pub fn congested_road(name: &str, status: u8, x: f64, y: f64) -> RoadCondition {
    RoadCondition {
        name: name.to_owned(),
        status,
        location: Coord { x, y },
    }
}

/// `PathSource` returning scripted candidate batches.
#[derive(Debug)]
pub struct StubPathSource {
    script: Script<Vec<CandidateRoute>>,
}

impl StubPathSource {
    /// Always return `routes`.
    #[must_use]
    pub fn with_routes(routes: Vec<CandidateRoute>) -> Self {
        Self {
            script: Script::new(Ok(routes)),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: CollaboratorError) -> Self {
        Self {
            script: Script::new(Err(error)),
        }
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.script.calls()
    }
}

#[async_trait]
impl PathSource for StubPathSource {
    async fn plan_paths(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
        _mode: TravelMode,
        _strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
        self.script.next()
    }
}

/// `TrafficSource` returning scripted snapshots.
#[derive(Debug)]
pub struct StubTrafficSource {
    script: Script<TrafficSnapshot>,
    regions: Mutex<Vec<Rect<f64>>>,
}

impl StubTrafficSource {
    /// Always return `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: TrafficSnapshot) -> Self {
        Self::from_script(Script::new(Ok(snapshot)))
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: CollaboratorError) -> Self {
        Self::from_script(Script::new(Err(error)))
    }

    /// Return `responses` in order, then an empty snapshot forever.
    #[must_use]
    pub fn with_sequence(responses: Vec<Result<TrafficSnapshot, CollaboratorError>>) -> Self {
        Self::from_script(Script::sequence(responses, Ok(TrafficSnapshot::default())))
    }

    fn from_script(script: Script<TrafficSnapshot>) -> Self {
        Self {
            script,
            regions: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.script.calls()
    }

    /// Regions requested so far, oldest first.
    #[must_use]
    pub fn regions(&self) -> Vec<Rect<f64>> {
        self.regions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TrafficSource for StubTrafficSource {
    async fn traffic_in_region(
        &self,
        region: &Rect<f64>,
    ) -> Result<TrafficSnapshot, CollaboratorError> {
        self.regions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*region);
        self.script.next()
    }
}

/// `WeatherSource` returning scripted readings.
#[derive(Debug)]
pub struct StubWeatherSource {
    script: Script<WeatherReading>,
}

impl StubWeatherSource {
    /// Always return `reading`.
    #[must_use]
    pub fn with_reading(reading: WeatherReading) -> Self {
        Self {
            script: Script::new(Ok(reading)),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: CollaboratorError) -> Self {
        Self {
            script: Script::new(Err(error)),
        }
    }

    /// Return `readings` in order, then repeat the last one.
    #[must_use]
    pub fn with_sequence(readings: Vec<WeatherReading>) -> Self {
        let fallback = readings
            .last()
            .cloned()
            .map_or_else(|| Ok(WeatherReading::new("clear", 15.0, 0)), Ok);
        Self {
            script: Script::sequence(readings.into_iter().map(Ok).collect(), fallback),
        }
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.script.calls()
    }
}

#[async_trait]
impl WeatherSource for StubWeatherSource {
    async fn current_weather(
        &self,
        _location: Coord<f64>,
    ) -> Result<WeatherReading, CollaboratorError> {
        self.script.next()
    }
}

/// `PoiSource` returning a fixed list filtered by category.
#[derive(Debug, Default)]
pub struct StubPoiSource {
    pois: Vec<PointOfInterest>,
}

impl StubPoiSource {
    /// Serve `pois`.
    #[must_use]
    pub const fn with_pois(pois: Vec<PointOfInterest>) -> Self {
        Self { pois }
    }
}

#[async_trait]
impl PoiSource for StubPoiSource {
    async fn pois_near(
        &self,
        _polyline: &[Coord<f64>],
        categories: &[PoiCategory],
    ) -> Result<Vec<PointOfInterest>, CollaboratorError> {
        Ok(self
            .pois
            .iter()
            .filter(|poi| categories.contains(&poi.category))
            .cloned()
            .collect())
    }
}
