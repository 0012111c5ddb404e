//! Planner configuration.

use std::time::Duration;

use wayfarer_scorer::{NEUTRAL_TRAFFIC_SCORE, NEUTRAL_WEATHER_SCORE};

/// Configuration for [`crate::RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Upper bound on candidates scored per call.
    pub max_candidates: usize,
    /// Whether live traffic feeds the traffic sub-score.
    pub consider_traffic: bool,
    /// Whether live weather feeds the weather sub-score.
    pub consider_weather: bool,
    /// Time allowed for each collaborator call.
    pub collaborator_timeout: Duration,
    /// Traffic sub-score used when traffic is disabled or unavailable.
    pub neutral_traffic_score: f64,
    /// Weather sub-score used when weather is disabled or unavailable.
    pub neutral_weather_score: f64,
    /// Padding in degrees around each route when requesting traffic.
    pub region_padding_deg: f64,
    /// Roads closer than this to a route count against its traffic score.
    pub congestion_threshold_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            consider_traffic: true,
            consider_weather: true,
            collaborator_timeout: Duration::from_secs(5),
            neutral_traffic_score: NEUTRAL_TRAFFIC_SCORE,
            neutral_weather_score: NEUTRAL_WEATHER_SCORE,
            region_padding_deg: 0.01,
            congestion_threshold_m: 500.0,
        }
    }
}

impl PlannerConfig {
    /// Cap the number of candidates scored per call.
    #[must_use]
    pub const fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Enable or disable live traffic.
    #[must_use]
    pub const fn with_traffic(mut self, enabled: bool) -> Self {
        self.consider_traffic = enabled;
        self
    }

    /// Enable or disable live weather.
    #[must_use]
    pub const fn with_weather(mut self, enabled: bool) -> Self {
        self.consider_weather = enabled;
        self
    }

    /// Override the per-call collaborator timeout.
    #[must_use]
    pub const fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }
}
