//! Monitor and session configuration.

use std::time::Duration;

use wayfarer_core::{Preference, PreferenceSet, TravelMode};
use wayfarer_planner::PlannerConfig;

/// Configuration for [`crate::TrafficMonitor`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Time between recurring polls.
    pub poll_interval: Duration,
    /// Events closer than this to the route raise alerts.
    pub proximity_threshold_m: f64,
    /// Padding in degrees added around the route when polling.
    pub region_padding_deg: f64,
    /// Time allowed for each traffic fetch.
    pub fetch_timeout: Duration,
    /// Alerts buffered per subscriber before the oldest are dropped.
    pub alert_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            proximity_threshold_m: 500.0,
            region_padding_deg: 0.01,
            fetch_timeout: Duration::from_secs(5),
            alert_capacity: 64,
        }
    }
}

impl MonitorConfig {
    /// Override the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Override the traffic fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

/// Configuration for [`crate::NavigationSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Time between weather readings while navigating.
    pub weather_interval: Duration,
    /// Weather impact from which the traveller is warned.
    pub notify_impact: f64,
    /// Weather impact from which a reroute is evaluated.
    pub reroute_impact: f64,
    /// A new route must take less than this share of the current duration.
    pub improvement_ratio: f64,
    /// Speed used to estimate the current route's duration when none is cached.
    pub fallback_speed_kmh: f64,
    /// Preferences used when replanning.
    pub preferences: PreferenceSet,
    /// Travel mode used when replanning.
    pub mode: TravelMode,
    /// Planner settings.
    pub planner: PlannerConfig,
    /// Traffic monitor settings.
    pub monitor: MonitorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            weather_interval: Duration::from_secs(300),
            notify_impact: 0.3,
            reroute_impact: 0.5,
            improvement_ratio: 0.8,
            fallback_speed_kmh: 40.0,
            preferences: PreferenceSet::new().with(Preference::Fastest),
            mode: TravelMode::Drive,
            planner: PlannerConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Override the monitor settings.
    #[must_use]
    pub fn with_monitor(mut self, monitor: MonitorConfig) -> Self {
        self.monitor = monitor;
        self
    }

    /// Override the weather polling interval.
    #[must_use]
    pub const fn with_weather_interval(mut self, weather_interval: Duration) -> Self {
        self.weather_interval = weather_interval;
        self
    }
}
