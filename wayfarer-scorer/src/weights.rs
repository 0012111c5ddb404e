//! Preference-dependent weight profiles for the composite score.

use wayfarer_core::{Preference, PreferenceSet};

/// Coefficients applied to each sub-score of a [`crate::ScoreBreakdown`].
///
/// Every profile returned by [`weight_profile`] sums to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightProfile {
    /// Weight of the journey-time score.
    pub time: f64,
    /// Weight of the distance score.
    pub distance: f64,
    /// Weight of the traffic score.
    pub traffic: f64,
    /// Weight of the weather score.
    pub weather: f64,
    /// Weight of the preference score.
    pub preference: f64,
}

impl WeightProfile {
    /// Balanced profile used when no objective is requested.
    pub const DEFAULT: Self = Self {
        time: 0.3,
        distance: 0.2,
        traffic: 0.25,
        weather: 0.1,
        preference: 0.15,
    };

    /// Profile favouring journey time.
    pub const FASTEST: Self = Self {
        time: 0.4,
        distance: 0.15,
        traffic: 0.25,
        weather: 0.1,
        preference: 0.1,
    };

    /// Profile favouring distance.
    pub const SHORTEST: Self = Self {
        time: 0.2,
        distance: 0.4,
        traffic: 0.2,
        weather: 0.1,
        preference: 0.1,
    };

    /// Sum of all coefficients.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "sums weight coefficients")]
    pub fn total(&self) -> f64 {
        self.time + self.distance + self.traffic + self.weather + self.preference
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Select the weight profile for `preferences`.
///
/// `fastest` is checked before `shortest`, so a set containing both uses the
/// fastest profile.
///
/// # Examples
/// ```
/// use wayfarer_core::{Preference, PreferenceSet};
/// use wayfarer_scorer::{WeightProfile, weight_profile};
///
/// let both: PreferenceSet = [Preference::Shortest, Preference::Fastest].into_iter().collect();
/// assert_eq!(weight_profile(&both), WeightProfile::FASTEST);
/// ```
#[must_use]
pub fn weight_profile(preferences: &PreferenceSet) -> WeightProfile {
    if preferences.contains(Preference::Fastest) {
        WeightProfile::FASTEST
    } else if preferences.contains(Preference::Shortest) {
        WeightProfile::SHORTEST
    } else {
        WeightProfile::DEFAULT
    }
}
