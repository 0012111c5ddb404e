//! Navigation sessions: monitoring a route and deciding when to reroute.
//!
//! A [`NavigationSession`] owns one [`TrafficMonitor`] and one
//! [`RoutePlanner`]. While navigating it consumes the monitor's alerts and
//! watches the weather at the traveller's position. Severe traffic and a
//! sharp turn for the worse in the weather trigger a fresh plan, which is
//! only surfaced when it beats the current route by a clear margin.
//! Everything the traveller should hear about is published as a
//! [`Notification`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use geo::Coord;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use wayfarer_core::{
    Alert, CandidateRoute, PathSource, PoiSource, TrafficSource, WeatherCategory, WeatherImpact,
    WeatherReading, WeatherSource, polyline_length,
};
use wayfarer_planner::{PlanRequest, RoutePlanner};
use wayfarer_scorer::ScoredRoute;

use crate::{SessionConfig, SessionError, TrafficMonitor};

/// Why a reroute was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum RerouteReason {
    /// The weather turned bad.
    Weather(WeatherCategory),
    /// A severe traffic event was detected near the route.
    Traffic {
        /// Identifier of the triggering event.
        event_id: String,
    },
}

/// A better route found while navigating.
#[derive(Debug, Clone, PartialEq)]
pub struct RerouteSuggestion {
    /// The proposed route.
    pub route: ScoredRoute,
    /// Estimated duration of the route currently followed.
    pub current_duration: Duration,
    /// Duration of the proposed route.
    pub new_duration: Duration,
    /// Whole minutes saved by switching, rounded down (210 s reports 3).
    pub minutes_saved: u64,
    /// What prompted the evaluation.
    pub reason: RerouteReason,
}

/// Something the traveller should be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A new traffic event near the route.
    TrafficAlert(Alert),
    /// The weather turned bad.
    WeatherWarning {
        /// Reading that triggered the warning.
        reading: WeatherReading,
        /// Its estimated impact.
        impact: WeatherImpact,
    },
    /// A faster route is available.
    RerouteSuggested(RerouteSuggestion),
}

#[derive(Debug, Clone)]
struct ActiveRoute {
    destination: Coord<f64>,
    polyline: Vec<Coord<f64>>,
    duration: Option<Duration>,
}

#[derive(Debug, Default)]
struct SessionState {
    route: Option<ActiveRoute>,
    position: Option<Coord<f64>>,
    weather: Option<WeatherCategory>,
    generation: u64,
    tasks: Option<CancellationToken>,
}

impl SessionState {
    const fn admits(&self, origin: Origin) -> bool {
        match origin {
            Origin::Caller => true,
            Origin::Navigation(generation) => {
                self.generation == generation && self.route.is_some()
            }
        }
    }
}

/// Who is reacting to a reading or alert.
#[derive(Debug, Clone, Copy)]
enum Origin {
    /// A direct call on the session.
    Caller,
    /// Background work belonging to one navigation.
    Navigation(u64),
}

/// Snapshot of the route a reroute is compared against.
struct Baseline {
    origin: Coord<f64>,
    destination: Coord<f64>,
    polyline: Vec<Coord<f64>>,
    duration: Duration,
    generation: u64,
}

struct Shared<P, T, W, I>
where
    P: PathSource + 'static,
    T: TrafficSource + 'static,
    W: WeatherSource + 'static,
    I: PoiSource + 'static,
{
    planner: RoutePlanner<P, Arc<T>, Arc<W>, I>,
    monitor: TrafficMonitor<Arc<T>>,
    weather: Arc<W>,
    config: SessionConfig,
    state: Mutex<SessionState>,
    notifications: broadcast::Sender<Notification>,
}

impl<P, T, W, I> Shared<P, T, W, I>
where
    P: PathSource + 'static,
    T: TrafficSource + 'static,
    W: WeatherSource + 'static,
    I: PoiSource + 'static,
{
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `notification` unless `origin` belongs to a finished navigation.
    fn notify(&self, origin: Origin, notification: Notification) -> bool {
        let state = self.lock();
        if !state.admits(origin) {
            log::debug!("discarding notification from a finished navigation");
            return false;
        }
        // Sent under the lock so `stop_navigation` cannot return between the check and the send.
        if self.notifications.send(notification).is_err() {
            log::debug!("notification dropped: no subscribers");
        }
        true
    }

    fn is_navigating(&self) -> bool {
        self.lock().route.is_some()
    }

    fn current_position(&self) -> Option<Coord<f64>> {
        let state = self.lock();
        state.position.or_else(|| {
            state
                .route
                .as_ref()
                .and_then(|route| route.polyline.first().copied())
        })
    }

    fn baseline(&self) -> Result<Baseline, SessionError> {
        let state = self.lock();
        let route = state.route.as_ref().ok_or(SessionError::NotActive)?;
        let origin = state
            .position
            .or_else(|| route.polyline.first().copied())
            .ok_or(SessionError::NotActive)?;
        let duration = route.duration.unwrap_or_else(|| {
            estimate_duration(&route.polyline, self.config.fallback_speed_kmh)
        });
        Ok(Baseline {
            origin,
            destination: route.destination,
            polyline: route.polyline.clone(),
            duration,
            generation: state.generation,
        })
    }

    async fn evaluate_reroute(
        &self,
        reason: RerouteReason,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        let baseline = self.baseline()?;
        let request = PlanRequest::new(baseline.origin, baseline.destination, self.config.mode)
            .with_preferences(self.config.preferences.clone());
        let plan = self.planner.plan(&request).await?;

        let Some(candidate) = plan
            .routes
            .into_iter()
            .find(|scored| scored.route.polyline != baseline.polyline)
        else {
            log::debug!("no alternative to the current route");
            return Ok(None);
        };

        let new_duration = candidate.route.duration;
        if !is_worth_switching(
            baseline.duration,
            new_duration,
            self.config.improvement_ratio,
        ) {
            log::debug!(
                "keeping current route: {}s is not enough faster than {}s",
                new_duration.as_secs(),
                baseline.duration.as_secs()
            );
            return Ok(None);
        }
        let minutes_saved = baseline
            .duration
            .saturating_sub(new_duration)
            .as_secs()
            .checked_div(60)
            .unwrap_or_default();
        let suggestion = RerouteSuggestion {
            route: candidate,
            current_duration: baseline.duration,
            new_duration,
            minutes_saved,
            reason,
        };
        let origin = Origin::Navigation(baseline.generation);
        if !self.notify(origin, Notification::RerouteSuggested(suggestion.clone())) {
            return Ok(None);
        }
        log::info!(
            "suggested route {} to save {minutes_saved} min ({:?})",
            suggestion.route.route.id,
            suggestion.reason
        );
        Ok(Some(suggestion))
    }

    async fn handle_weather(
        &self,
        reading: WeatherReading,
        origin: Origin,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        let impact = self.weather.impact_of(&reading);
        let previous = {
            let mut state = self.lock();
            if !state.admits(origin) {
                return Ok(None);
            }
            state.weather.replace(impact.category)
        };
        if previous == Some(impact.category) || !impact.category.is_bad() {
            return Ok(None);
        }
        log::info!(
            "weather changed to {} (impact {:.2})",
            impact.category,
            impact.impact
        );
        if impact.impact >= self.config.notify_impact
            && !self.notify(origin, Notification::WeatherWarning { reading, impact })
        {
            return Ok(None);
        }
        if impact.impact >= self.config.reroute_impact && self.is_navigating() {
            return self
                .evaluate_reroute(RerouteReason::Weather(impact.category))
                .await;
        }
        Ok(None)
    }

    async fn handle_alert(
        &self,
        alert: Alert,
        origin: Origin,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        let severe = alert.is_severe();
        let event_id = alert.event.id.clone();
        if !self.notify(origin, Notification::TrafficAlert(alert)) {
            return Ok(None);
        }
        if severe && self.is_navigating() {
            return self
                .evaluate_reroute(RerouteReason::Traffic { event_id })
                .await;
        }
        Ok(None)
    }

    async fn watch_weather(&self, origin: Origin) {
        let Some(position) = self.current_position() else {
            return;
        };
        let limit = self.config.planner.collaborator_timeout;
        let reading = tokio::time::timeout(limit, self.weather.current_weather(position)).await;
        match reading {
            Ok(Ok(reading)) => {
                if let Err(error) = self.handle_weather(reading, origin).await {
                    log::warn!("weather reroute failed: {error}");
                }
            }
            Ok(Err(error)) => log::warn!("skipping weather check: {error}"),
            Err(_) => log::warn!("skipping weather check: no reading within {limit:?}"),
        }
    }
}

/// Owns the monitoring and reroute decisions for one journey at a time.
///
/// Background work (alert handling and the weather watch) runs on Tokio
/// tasks that end when navigation stops or the session is dropped.
pub struct NavigationSession<P, T, W, I>
where
    P: PathSource + 'static,
    T: TrafficSource + 'static,
    W: WeatherSource + 'static,
    I: PoiSource + 'static,
{
    shared: Arc<Shared<P, T, W, I>>,
}

impl<P, T, W, I> NavigationSession<P, T, W, I>
where
    P: PathSource + 'static,
    T: TrafficSource + 'static,
    W: WeatherSource + 'static,
    I: PoiSource + 'static,
{
    /// Build an idle session over the given collaborators.
    #[must_use]
    pub fn new(paths: P, traffic: T, weather: W, pois: I, config: SessionConfig) -> Self {
        let traffic = Arc::new(traffic);
        let weather = Arc::new(weather);
        let planner = RoutePlanner::with_config(
            paths,
            Arc::clone(&traffic),
            Arc::clone(&weather),
            pois,
            config.planner.clone(),
        );
        let monitor = TrafficMonitor::new(traffic, config.monitor.clone());
        let (notifications, _) = broadcast::channel(config.monitor.alert_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                planner,
                monitor,
                weather,
                config,
                state: Mutex::new(SessionState::default()),
                notifications,
            }),
        }
    }

    /// Receive notifications published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.shared.notifications.subscribe()
    }

    /// Start navigating towards `destination` along `polyline`.
    ///
    /// The current route's duration is estimated from its length until
    /// [`Self::start_navigation_with_route`] or [`Self::accept_reroute`]
    /// supplies one. Weather seen before the start is forgotten, so bad
    /// weather at the outset counts as a change.
    ///
    /// # Errors
    /// Returns [`SessionError::Monitor`] when the route is empty or
    /// navigation is already under way.
    pub async fn start_navigation(
        &self,
        destination: Coord<f64>,
        polyline: Vec<Coord<f64>>,
    ) -> Result<(), SessionError> {
        self.begin(destination, polyline, None).await
    }

    /// Start navigating along a planned route, caching its duration.
    ///
    /// # Errors
    /// As for [`Self::start_navigation`].
    pub async fn start_navigation_with_route(
        &self,
        destination: Coord<f64>,
        route: &CandidateRoute,
    ) -> Result<(), SessionError> {
        self.begin(destination, route.polyline.clone(), Some(route.duration))
            .await
    }

    async fn begin(
        &self,
        destination: Coord<f64>,
        polyline: Vec<Coord<f64>>,
        duration: Option<Duration>,
    ) -> Result<(), SessionError> {
        let alerts = self.shared.monitor.subscribe();
        self.shared
            .monitor
            .start(polyline.clone(), self.shared.config.monitor.poll_interval)
            .await?;
        let token = CancellationToken::new();
        let generation = {
            let mut state = self.shared.lock();
            state.generation = state.generation.wrapping_add(1);
            state.route = Some(ActiveRoute {
                destination,
                polyline,
                duration,
            });
            state.weather = None;
            state.tasks = Some(token.clone());
            state.generation
        };
        log::info!("navigation started");
        let origin = Origin::Navigation(generation);
        self.spawn_alert_handler(alerts, token.clone(), origin);
        self.spawn_weather_watch(token, origin);
        Ok(())
    }

    fn spawn_alert_handler(
        &self,
        mut alerts: broadcast::Receiver<Alert>,
        token: CancellationToken,
        origin: Origin,
    ) {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    received = alerts.recv() => received,
                };
                match received {
                    Ok(alert) => {
                        if let Err(error) = shared.handle_alert(alert, origin).await {
                            log::warn!("traffic reroute failed: {error}");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("skipped {skipped} traffic alerts");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    fn spawn_weather_watch(&self, token: CancellationToken, origin: Origin) {
        let shared = Arc::clone(&self.shared);
        let period = self.shared.config.weather_interval;
        if period.is_zero() {
            log::warn!("weather watch disabled: zero interval");
            return;
        }
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            biased;
                            () = token.cancelled() => break,
                            () = shared.watch_weather(origin) => {}
                        }
                    }
                }
            }
        });
    }

    /// Stop navigating, ending monitoring and background work.
    pub fn stop_navigation(&self) {
        {
            let mut state = self.shared.lock();
            if let Some(token) = state.tasks.take() {
                token.cancel();
            }
            if state.route.take().is_some() {
                log::info!("navigation stopped");
            }
            state.generation = state.generation.wrapping_add(1);
        }
        self.shared.monitor.stop();
    }

    /// Record the traveller's latest position.
    pub fn update_position(&self, position: Coord<f64>) {
        self.shared.lock().position = Some(position);
    }

    /// React to a weather reading.
    ///
    /// Only a change into a bad category counts. The traveller is warned
    /// from `notify_impact`, and a reroute is evaluated from
    /// `reroute_impact` while navigating.
    ///
    /// # Errors
    /// Returns [`SessionError::Plan`] when replanning fails.
    pub async fn handle_weather(
        &self,
        reading: WeatherReading,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        self.shared.handle_weather(reading, Origin::Caller).await
    }

    /// React to a traffic alert, evaluating a reroute when it is severe.
    ///
    /// # Errors
    /// Returns [`SessionError::Plan`] when replanning fails.
    pub async fn handle_alert(
        &self,
        alert: Alert,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        self.shared.handle_alert(alert, Origin::Caller).await
    }

    /// Plan afresh and suggest the result if it is clearly faster.
    ///
    /// The current route's duration is the cached one, or its length at
    /// `fallback_speed_kmh`. A candidate is suggested only when it differs
    /// from the current route and takes less than `improvement_ratio` of
    /// that duration.
    ///
    /// # Errors
    /// Returns [`SessionError::NotActive`] when not navigating and
    /// [`SessionError::Plan`] when replanning fails.
    pub async fn evaluate_reroute(
        &self,
        reason: RerouteReason,
    ) -> Result<Option<RerouteSuggestion>, SessionError> {
        self.shared.evaluate_reroute(reason).await
    }

    /// Switch to a suggested route.
    ///
    /// The monitor keeps its schedule but watches the new geometry, and the
    /// suggestion's duration becomes the cached one.
    ///
    /// # Errors
    /// Returns [`SessionError::NotActive`] when not navigating.
    pub fn accept_reroute(&self, suggestion: &RerouteSuggestion) -> Result<(), SessionError> {
        let polyline = suggestion.route.route.polyline.clone();
        {
            let mut state = self.shared.lock();
            let route = state.route.as_mut().ok_or(SessionError::NotActive)?;
            route.polyline.clone_from(&polyline);
            route.duration = Some(suggestion.new_duration);
        }
        self.shared.monitor.update_route(polyline)?;
        log::info!("switched to route {}", suggestion.route.route.id);
        Ok(())
    }

    /// Report whether navigation is under way.
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.shared.is_navigating()
    }

    /// Return the route currently followed.
    #[must_use]
    pub fn current_route(&self) -> Option<Vec<Coord<f64>>> {
        self.shared
            .lock()
            .route
            .as_ref()
            .map(|route| route.polyline.clone())
    }

    /// Return the traffic monitor driven by this session.
    #[must_use]
    pub fn monitor(&self) -> &TrafficMonitor<Arc<T>> {
        &self.shared.monitor
    }
}

impl<P, T, W, I> Drop for NavigationSession<P, T, W, I>
where
    P: PathSource + 'static,
    T: TrafficSource + 'static,
    W: WeatherSource + 'static,
    I: PoiSource + 'static,
{
    fn drop(&mut self) {
        self.stop_navigation();
    }
}

/// Duration of `polyline` at a constant `speed_kmh`.
#[expect(clippy::float_arithmetic, reason = "converts km/h to m/s")]
fn estimate_duration(polyline: &[Coord<f64>], speed_kmh: f64) -> Duration {
    let metres_per_second = speed_kmh / 3.6;
    Duration::try_from_secs_f64(polyline_length(polyline) / metres_per_second)
        .unwrap_or(Duration::ZERO)
}

/// Whether `new` is below `ratio` of `current`.
#[expect(clippy::float_arithmetic, reason = "compares scaled durations")]
fn is_worth_switching(current: Duration, new: Duration, ratio: f64) -> bool {
    new.as_secs_f64() < ratio * current.as_secs_f64()
}
