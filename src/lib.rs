//! Facade crate for the Wayfarer route recommendation engine.
//!
//! This crate re-exports the core domain types, the scorer and the planner,
//! and exposes live monitoring and the OSRM path source behind feature flags.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    Alert, CandidateRoute, CollaboratorError, EventKind, PathSource, PoiCategory, PoiSource,
    PointOfInterest, Preference, PreferenceSet, RouteStep, RouteStrategy, Severity, TrafficEvent,
    TrafficSnapshot, TrafficSource, TravelMode, Unconfigured, WeatherCategory, WeatherImpact,
    WeatherReading, WeatherSource, bounding_box, haversine_distance, point_to_segment_distance,
};
pub use wayfarer_planner::{PlanError, PlanRequest, PlanResult, PlannerConfig, RoutePlanner};
pub use wayfarer_scorer::{RankError, ScoreBreakdown, ScoredRoute, WeightProfile, rank};

#[cfg(feature = "monitor")]
pub use wayfarer_monitor::{
    MonitorConfig, MonitorError, NavigationSession, Notification, RerouteReason,
    RerouteSuggestion, SessionConfig, SessionError, TrafficMonitor,
};

#[cfg(feature = "http")]
pub use wayfarer_data::routing::{HttpPathSource, HttpPathSourceConfig, ProviderBuildError};

#[cfg(feature = "test-support")]
pub use wayfarer_core::test_support;
