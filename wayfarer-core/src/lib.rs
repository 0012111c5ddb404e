//! Core domain types for the Wayfarer navigation engine.
//!
//! The crate holds the shared vocabulary used by route evaluation and live
//! monitoring: candidate routes, preference sets, traffic events, weather
//! readings and alerts. It also defines the collaborator traits through which
//! the engine reaches external path, traffic, weather and POI providers, and
//! the pure geometric helpers both halves of the engine rely on.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod alert;
pub mod category;
pub mod collaborator;
pub mod geo_math;
pub mod poi;
pub mod preference;
pub mod route;
pub mod traffic;
pub mod weather;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alert::Alert;
pub use category::PoiCategory;
pub use collaborator::{
    CollaboratorError, PathSource, PoiSource, TrafficSource, Unconfigured, WeatherSource,
};
pub use geo_math::{
    EARTH_RADIUS_M, GeoError, bounding_box, distance_to_polyline, haversine_distance,
    point_to_segment_distance, polyline_length,
};
pub use poi::PointOfInterest;
pub use preference::{Preference, PreferenceParseError, PreferenceSet, RouteStrategy};
pub use route::{CandidateRoute, RouteError, RouteStep, TravelMode};
pub use traffic::{
    EventKind, ReportedIncident, RoadCondition, Severity, TrafficEvent, TrafficSnapshot,
};
pub use weather::{WeatherCategory, WeatherImpact, WeatherReading, classify_weather};
