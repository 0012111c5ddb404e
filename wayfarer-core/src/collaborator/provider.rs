//! Collaborator traits for path, traffic, weather and POI providers.

use std::sync::Arc;

use async_trait::async_trait;
use geo::{Coord, Rect};

use super::error::CollaboratorError;
use crate::{
    CandidateRoute, PoiCategory, PointOfInterest, RouteStrategy, TrafficSnapshot, TravelMode,
    WeatherImpact, WeatherReading, classify_weather,
};

/// Produce raw candidate paths between two coordinates.
///
/// Implementations should return at most a handful of alternatives; the
/// planner caps the batch it scores.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Coord;
/// use wayfarer_core::{
///     CandidateRoute, CollaboratorError, PathSource, RouteStrategy, TravelMode,
/// };
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl PathSource for StraightLine {
///     async fn plan_paths(
///         &self,
///         origin: Coord<f64>,
///         destination: Coord<f64>,
///         _mode: TravelMode,
///         _strategy: RouteStrategy,
///     ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
///         Ok(vec![CandidateRoute::new(
///             "direct",
///             wayfarer_core::haversine_distance(origin, destination),
///             Duration::from_secs(600),
///             vec![origin, destination],
///         )])
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), CollaboratorError> {
/// let paths = StraightLine
///     .plan_paths(
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 0.01, y: 0.0 },
///         TravelMode::Drive,
///         RouteStrategy::default(),
///     )
///     .await?;
/// assert_eq!(paths.len(), 1);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PathSource: Send + Sync {
    /// Return candidate paths from `origin` to `destination`.
    async fn plan_paths(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
        strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError>;
}

/// Report traffic conditions within a bounding region.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// Return the current snapshot for `region`.
    ///
    /// Implementations return [`CollaboratorError::MalformedSnapshot`] when
    /// the provider payload cannot be validated.
    async fn traffic_in_region(
        &self,
        region: &Rect<f64>,
    ) -> Result<TrafficSnapshot, CollaboratorError>;
}

/// Report weather at a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Return the current reading at `location`.
    async fn current_weather(
        &self,
        location: Coord<f64>,
    ) -> Result<WeatherReading, CollaboratorError>;

    /// Estimate the travel impact of `reading`.
    ///
    /// The default delegates to [`classify_weather`].
    fn impact_of(&self, reading: &WeatherReading) -> WeatherImpact {
        classify_weather(reading)
    }
}

/// Find points of interest along a route.
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Return POIs near `polyline` matching any of `categories`.
    async fn pois_near(
        &self,
        polyline: &[Coord<f64>],
        categories: &[PoiCategory],
    ) -> Result<Vec<PointOfInterest>, CollaboratorError>;
}

#[async_trait]
impl<T: PathSource + ?Sized> PathSource for Arc<T> {
    async fn plan_paths(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
        strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
        (**self)
            .plan_paths(origin, destination, mode, strategy)
            .await
    }
}

#[async_trait]
impl<T: TrafficSource + ?Sized> TrafficSource for Arc<T> {
    async fn traffic_in_region(
        &self,
        region: &Rect<f64>,
    ) -> Result<TrafficSnapshot, CollaboratorError> {
        (**self).traffic_in_region(region).await
    }
}

#[async_trait]
impl<T: WeatherSource + ?Sized> WeatherSource for Arc<T> {
    async fn current_weather(
        &self,
        location: Coord<f64>,
    ) -> Result<WeatherReading, CollaboratorError> {
        (**self).current_weather(location).await
    }

    fn impact_of(&self, reading: &WeatherReading) -> WeatherImpact {
        (**self).impact_of(reading)
    }
}

#[async_trait]
impl<T: PoiSource + ?Sized> PoiSource for Arc<T> {
    async fn pois_near(
        &self,
        polyline: &[Coord<f64>],
        categories: &[PoiCategory],
    ) -> Result<Vec<PointOfInterest>, CollaboratorError> {
        (**self).pois_near(polyline, categories).await
    }
}
