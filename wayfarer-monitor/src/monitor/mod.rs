//! Periodic traffic polling around a live route.
//!
//! A [`TrafficMonitor`] is either idle or monitoring one route. While
//! monitoring it polls the traffic source for the route's padded bounding
//! region, keeps the set of active events keyed by id, and broadcasts an
//! [`Alert`] the first time an event is seen close to the route.
//!
//! Polls for one monitor never overlap: the first runs inside
//! [`TrafficMonitor::start`] and the rest run one after another on a
//! background task. Each poll stamps the generation it was started under and
//! discards its result if the monitor has been stopped or restarted since.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use geo::{Coord, Rect};
use tokio::sync::broadcast;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wayfarer_core::{
    Alert, CollaboratorError, TrafficEvent, TrafficSource, bounding_box, distance_to_polyline,
};

use crate::{MonitorConfig, MonitorError, synthesize_events};

/// Route geometry being watched.
#[derive(Debug, Clone, PartialEq)]
struct WatchedRoute {
    polyline: Vec<Coord<f64>>,
    region: Rect<f64>,
}

#[derive(Debug, Default)]
struct MonitorState {
    route: Option<WatchedRoute>,
    active_events: HashMap<String, TrafficEvent>,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl MonitorState {
    fn is_current(&self, generation: u64) -> bool {
        self.route.is_some() && self.generation == generation
    }

    /// Merge one poll's events and return alerts for new nearby events.
    fn apply(
        &mut self,
        events: Vec<TrafficEvent>,
        polyline: &[Coord<f64>],
        threshold_m: f64,
        now: SystemTime,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let mut seen = HashSet::with_capacity(events.len());
        for event in events {
            seen.insert(event.id.clone());
            match self.active_events.entry(event.id.clone()) {
                Entry::Occupied(mut slot) => {
                    let first_seen_at = slot.get().first_seen_at;
                    slot.insert(TrafficEvent {
                        first_seen_at,
                        ..event
                    });
                }
                Entry::Vacant(slot) => {
                    let near_route = distance_to_polyline(event.location, polyline)
                        .is_some_and(|distance| distance < threshold_m);
                    if near_route {
                        alerts.push(Alert::for_event(event.clone(), true, now));
                    }
                    slot.insert(event);
                }
            }
        }
        self.active_events.retain(|id, _| seen.contains(id));
        alerts
    }
}

struct Shared<T> {
    source: T,
    config: MonitorConfig,
    state: Mutex<MonitorState>,
    alerts: broadcast::Sender<Alert>,
}

impl<T: TrafficSource> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn capture(&self, generation: u64) -> Option<WatchedRoute> {
        let state = self.lock();
        if state.is_current(generation) {
            state.route.clone()
        } else {
            None
        }
    }

    async fn poll(&self, generation: u64) {
        let Some(route) = self.capture(generation) else {
            return;
        };
        let limit = self.config.fetch_timeout;
        let fetched = tokio::time::timeout(limit, self.source.traffic_in_region(&route.region))
            .await
            .unwrap_or_else(|_| Err(CollaboratorError::timeout("traffic", limit)));
        let now = SystemTime::now();
        let events = match fetched {
            Ok(snapshot) => synthesize_events(&snapshot, now),
            Err(CollaboratorError::MalformedSnapshot { message }) => {
                log::warn!("treating malformed traffic snapshot as empty: {message}");
                Vec::new()
            }
            Err(error) => {
                log::warn!("skipping traffic poll: {error}");
                return;
            }
        };

        let mut state = self.lock();
        if !state.is_current(generation) {
            log::debug!("discarding traffic poll from a stopped monitor");
            return;
        }
        let alerts = state.apply(
            events,
            &route.polyline,
            self.config.proximity_threshold_m,
            now,
        );
        // Sent under the lock so `stop` cannot return between the check and the send.
        for alert in alerts {
            log::info!("traffic alert: {}", alert.suggestion_text);
            if self.alerts.send(alert).is_err() {
                log::debug!("traffic alert dropped: no subscribers");
            }
        }
    }
}

/// Polls a traffic source around a route and raises alerts.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::Unconfigured;
/// use wayfarer_monitor::{MonitorConfig, TrafficMonitor};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), wayfarer_monitor::MonitorError> {
/// let monitor = TrafficMonitor::new(Unconfigured, MonitorConfig::default());
/// let mut alerts = monitor.subscribe();
/// monitor
///     .start(
///         vec![Coord { x: 0.0, y: 51.5 }, Coord { x: 0.01, y: 51.5 }],
///         Duration::from_secs(30),
///     )
///     .await?;
/// assert!(monitor.is_active());
/// monitor.stop();
/// assert!(alerts.try_recv().is_err());
/// # Ok(())
/// # }
/// ```
pub struct TrafficMonitor<T: TrafficSource + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: TrafficSource + 'static> TrafficMonitor<T> {
    /// Create an idle monitor.
    #[must_use]
    pub fn new(source: T, config: MonitorConfig) -> Self {
        let (alerts, _) = broadcast::channel(config.alert_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                state: Mutex::new(MonitorState::default()),
                alerts,
            }),
        }
    }

    /// Receive alerts raised after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.shared.alerts.subscribe()
    }

    /// Start monitoring `polyline`, polling every `interval`.
    ///
    /// One poll completes before this returns; later polls run on a
    /// background task until [`Self::stop`] is called or the monitor is
    /// dropped. Must be called within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`MonitorError::EmptyRoute`] for an empty polyline,
    /// [`MonitorError::InvalidInterval`] for a zero interval and
    /// [`MonitorError::AlreadyMonitoring`] when already running.
    pub async fn start(
        &self,
        polyline: Vec<Coord<f64>>,
        interval: Duration,
    ) -> Result<(), MonitorError> {
        if interval.is_zero() {
            return Err(MonitorError::InvalidInterval);
        }
        let route = self.watched(polyline)?;
        let (generation, token) = {
            let mut state = self.shared.lock();
            if state.route.is_some() {
                return Err(MonitorError::AlreadyMonitoring);
            }
            state.generation = state.generation.wrapping_add(1);
            state.route = Some(route);
            state.active_events.clear();
            let token = CancellationToken::new();
            state.cancel = Some(token.clone());
            (state.generation, token)
        };
        log::info!("traffic monitoring started; polling every {interval:?}");

        self.shared.poll(generation).await;

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            () = token.cancelled() => break,
                            () = shared.poll(generation) => {}
                        }
                    }
                }
            }
            log::debug!("traffic poll loop for generation {generation} finished");
        });
        Ok(())
    }

    /// Stop monitoring and forget all active events.
    ///
    /// Safe to call at any time. No alert is broadcast after this returns,
    /// even from a poll that was already in flight.
    pub fn stop(&self) {
        let mut state = self.shared.lock();
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        if state.route.take().is_some() {
            log::info!("traffic monitoring stopped");
        }
        state.active_events.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    /// Replace the watched route without disturbing the poll schedule.
    ///
    /// Active events are kept; their alerts have already been raised.
    ///
    /// # Errors
    /// Returns [`MonitorError::EmptyRoute`] for an empty polyline and
    /// [`MonitorError::NotMonitoring`] when the monitor is idle.
    pub fn update_route(&self, polyline: Vec<Coord<f64>>) -> Result<(), MonitorError> {
        let route = self.watched(polyline)?;
        let mut state = self.shared.lock();
        let current = state.route.as_mut().ok_or(MonitorError::NotMonitoring)?;
        *current = route;
        log::debug!("monitored route updated");
        Ok(())
    }

    /// Report whether the monitor is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.lock().route.is_some()
    }

    /// Return the region currently polled, if monitoring.
    #[must_use]
    pub fn region(&self) -> Option<Rect<f64>> {
        self.shared.lock().route.as_ref().map(|route| route.region)
    }

    /// Return the route currently watched, if monitoring.
    #[must_use]
    pub fn polyline(&self) -> Option<Vec<Coord<f64>>> {
        self.shared
            .lock()
            .route
            .as_ref()
            .map(|route| route.polyline.clone())
    }

    /// Return the active events ordered by id.
    #[must_use]
    pub fn active_events(&self) -> Vec<TrafficEvent> {
        let mut events: Vec<TrafficEvent> =
            self.shared.lock().active_events.values().cloned().collect();
        events.sort_by(|left, right| left.id.cmp(&right.id));
        events
    }

    /// Return the configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.shared.config
    }

    fn watched(&self, polyline: Vec<Coord<f64>>) -> Result<WatchedRoute, MonitorError> {
        let region = bounding_box(&polyline, self.shared.config.region_padding_deg)
            .map_err(|_| MonitorError::EmptyRoute)?;
        Ok(WatchedRoute { polyline, region })
    }
}

impl<T: TrafficSource + 'static> Drop for TrafficMonitor<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<T: TrafficSource + 'static> std::fmt::Debug for TrafficMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("TrafficMonitor")
            .field("active", &state.route.is_some())
            .field("active_events", &state.active_events.len())
            .finish_non_exhaustive()
    }
}
