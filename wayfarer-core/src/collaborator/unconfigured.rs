//! Placeholder collaborator for providers that have not been configured.

use async_trait::async_trait;
use geo::{Coord, Rect};

use super::{CollaboratorError, PathSource, PoiSource, TrafficSource, WeatherSource};
use crate::{
    CandidateRoute, PoiCategory, PointOfInterest, RouteStrategy, TrafficSnapshot, TravelMode,
    WeatherReading,
};

/// Stands in for a provider with no credentials or endpoint.
///
/// Every call fails with [`CollaboratorError::ConfigurationMissing`], which
/// planners treat like any other collaborator failure and answer with
/// neutral scores.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{CollaboratorError, Unconfigured, WeatherSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let result = Unconfigured.current_weather(Coord { x: 0.0, y: 0.0 }).await;
/// assert_eq!(
///     result,
///     Err(CollaboratorError::ConfigurationMissing { collaborator: "weather" })
/// );
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconfigured;

#[async_trait]
impl PathSource for Unconfigured {
    async fn plan_paths(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
        _mode: TravelMode,
        _strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
        Err(CollaboratorError::ConfigurationMissing {
            collaborator: "path",
        })
    }
}

#[async_trait]
impl TrafficSource for Unconfigured {
    async fn traffic_in_region(
        &self,
        _region: &Rect<f64>,
    ) -> Result<TrafficSnapshot, CollaboratorError> {
        Err(CollaboratorError::ConfigurationMissing {
            collaborator: "traffic",
        })
    }
}

#[async_trait]
impl WeatherSource for Unconfigured {
    async fn current_weather(
        &self,
        _location: Coord<f64>,
    ) -> Result<WeatherReading, CollaboratorError> {
        Err(CollaboratorError::ConfigurationMissing {
            collaborator: "weather",
        })
    }
}

#[async_trait]
impl PoiSource for Unconfigured {
    async fn pois_near(
        &self,
        _polyline: &[Coord<f64>],
        _categories: &[PoiCategory],
    ) -> Result<Vec<PointOfInterest>, CollaboratorError> {
        Err(CollaboratorError::ConfigurationMissing { collaborator: "poi" })
    }
}
