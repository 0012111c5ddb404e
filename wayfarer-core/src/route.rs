//! Candidate routes returned by a path source.
//!
//! A [`CandidateRoute`] is produced once per planning call and never mutated
//! afterwards; scoring wraps it rather than editing it.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

/// How the traveller moves along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelMode {
    /// Private car.
    #[default]
    Drive,
    /// On foot.
    Walk,
    /// Bicycle.
    Ride,
    /// Public transport.
    Transit,
}

impl TravelMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Walk => "walk",
            Self::Ride => "ride",
            Self::Transit => "transit",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drive" | "driving" => Ok(Self::Drive),
            "walk" | "walking" => Ok(Self::Walk),
            "ride" | "cycling" => Ok(Self::Ride),
            "transit" => Ok(Self::Transit),
            _ => Err(format!("unknown travel mode '{s}'")),
        }
    }
}

/// One turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStep {
    /// Human-readable instruction, e.g. "turn left onto Main Street".
    pub instruction: String,
    /// Length of the step in metres.
    pub distance_m: f64,
    /// Expected time to complete the step.
    pub duration: Duration,
}

/// One proposed path between an origin and a destination.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::CandidateRoute;
///
/// let route = CandidateRoute::new(
///     "r0",
///     12_500.0,
///     Duration::from_secs(1_500),
///     vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.0 }],
/// )
/// .with_toll_cost(5.0);
///
/// assert!(route.has_tolls());
/// assert!(route.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRoute {
    /// Identifier unique within one planning batch.
    pub id: String,
    /// Total length in metres.
    pub distance_m: f64,
    /// Expected travel time.
    pub duration: Duration,
    /// Ordered route geometry.
    pub polyline: Vec<Coord<f64>>,
    /// Toll charged along the route; zero when toll-free.
    #[cfg_attr(feature = "serde", serde(default))]
    pub toll_cost: f64,
    /// Number of signalised junctions along the route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub traffic_lights: u32,
    /// Turn-by-turn instructions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Vec<RouteStep>,
}

/// Errors returned by [`CandidateRoute::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Distance was negative, NaN or infinite.
    #[error("route {id} has an invalid distance of {distance_m} m")]
    InvalidDistance {
        /// Offending route identifier.
        id: String,
        /// Reported distance.
        distance_m: f64,
    },
    /// Geometry had fewer than two points.
    #[error("route {id} needs at least two coordinates, found {points}")]
    ShortPolyline {
        /// Offending route identifier.
        id: String,
        /// Number of points present.
        points: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("route {id} has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Offending route identifier.
        id: String,
        /// Position of the coordinate within the polyline.
        index: usize,
    },
}

impl CandidateRoute {
    /// Construct a toll-free route without steps.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        distance_m: f64,
        duration: Duration,
        polyline: Vec<Coord<f64>>,
    ) -> Self {
        Self {
            id: id.into(),
            distance_m,
            duration,
            polyline,
            toll_cost: 0.0,
            traffic_lights: 0,
            steps: Vec::new(),
        }
    }

    /// Set the toll cost.
    #[must_use]
    pub fn with_toll_cost(mut self, toll_cost: f64) -> Self {
        self.toll_cost = toll_cost;
        self
    }

    /// Set the traffic light count.
    #[must_use]
    pub fn with_traffic_lights(mut self, traffic_lights: u32) -> Self {
        self.traffic_lights = traffic_lights;
        self
    }

    /// Set the turn-by-turn steps.
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<RouteStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Report whether the route carries a nonzero toll.
    #[must_use]
    pub fn has_tolls(&self) -> bool {
        self.toll_cost > 0.0
    }

    /// Check the route is usable for scoring and monitoring.
    ///
    /// # Errors
    /// Returns a [`RouteError`] when the distance is not a finite non-negative
    /// number, the polyline has fewer than two points, or any coordinate is
    /// non-finite.
    pub fn validate(&self) -> Result<(), RouteError> {
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err(RouteError::InvalidDistance {
                id: self.id.clone(),
                distance_m: self.distance_m,
            });
        }
        if self.polyline.len() < 2 {
            return Err(RouteError::ShortPolyline {
                id: self.id.clone(),
                points: self.polyline.len(),
            });
        }
        if let Some(index) = self
            .polyline
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(RouteError::NonFiniteCoordinate {
                id: self.id.clone(),
                index,
            });
        }
        Ok(())
    }
}
