//! Planning requests and results.

use geo::Coord;
use wayfarer_core::{PointOfInterest, PreferenceSet, TravelMode, WeatherImpact};
use wayfarer_scorer::ScoredRoute;

use crate::PlanError;

/// What to plan: endpoints, travel mode and merged preferences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Start of the journey.
    pub origin: Coord<f64>,
    /// End of the journey.
    pub destination: Coord<f64>,
    /// How the traveller moves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: TravelMode,
    /// Preferences merged from defaults and overrides.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: PreferenceSet,
}

impl PlanRequest {
    /// Build a request with no preferences.
    #[must_use]
    pub fn new(origin: Coord<f64>, destination: Coord<f64>, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
            preferences: PreferenceSet::new(),
        }
    }

    /// Replace the preference set.
    #[must_use]
    pub fn with_preferences(mut self, preferences: PreferenceSet) -> Self {
        self.preferences = preferences;
        self
    }

    /// Check both endpoints are finite coordinates.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] naming the offending endpoint.
    pub fn validate(&self) -> Result<(), PlanError> {
        for (name, point) in [("origin", self.origin), ("destination", self.destination)] {
            if !(point.x.is_finite() && point.y.is_finite()) {
                return Err(PlanError::InvalidRequest {
                    reason: format!("{name} is not a finite coordinate"),
                });
            }
        }
        Ok(())
    }
}

/// Ranked candidates plus decoration for the recommended route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    /// Candidates ordered best first; the first is recommended.
    pub routes: Vec<ScoredRoute>,
    /// Points of interest along the recommended route.
    pub pois: Vec<PointOfInterest>,
    /// Weather at the origin, when it was consulted successfully.
    pub weather: Option<WeatherImpact>,
}

impl PlanResult {
    /// Return the recommended route.
    #[must_use]
    pub fn recommended(&self) -> Option<&ScoredRoute> {
        self.routes.iter().find(|scored| scored.recommended)
    }
}
