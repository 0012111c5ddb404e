//! Sub-score normalisation and composition.

use wayfarer_core::{CandidateRoute, Preference, PreferenceSet};

use crate::WeightProfile;

/// Penalty applied when tolls should be avoided but the route has them.
const TOLL_PENALTY: f64 = 0.2;
/// Share of the time score credited when speed is requested.
const FASTEST_BONUS: f64 = 0.1;

/// Per-route sub-scores, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Journey time relative to the batch; `1.0` is quickest.
    pub time_score: f64,
    /// Distance relative to the batch; `1.0` is shortest.
    pub distance_score: f64,
    /// Congestion along the route; `1.0` is free-flowing.
    pub traffic_score: f64,
    /// Weather suitability; `1.0` is unaffected.
    pub weather_score: f64,
    /// Fit with the requested preferences.
    pub preference_score: f64,
}

/// Min-max normalise `target` within `values`.
///
/// A flat field (every value equal, or no values at all) yields `1.0` so
/// that ties never penalise a candidate. When `lower_is_better` is set the
/// result is inverted.
///
/// # Examples
/// ```
/// use wayfarer_scorer::normalize;
///
/// let durations = [1500.0, 1620.0, 1400.0];
/// assert_eq!(normalize(&durations, 1400.0, true), 1.0);
/// assert_eq!(normalize(&durations, 1620.0, true), 0.0);
/// assert_eq!(normalize(&[7.0, 7.0], 7.0, false), 1.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "min-max normalisation")]
pub fn normalize(values: &[f64], target: f64, lower_is_better: bool) -> f64 {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(*value), hi.max(*value))
        });
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return 1.0;
    }
    let scaled = ((target - min) / range).clamp(0.0, 1.0);
    if lower_is_better { 1.0 - scaled } else { scaled }
}

/// Score how well `route` fits `preferences`.
///
/// Starts at `1.0`, loses `0.2` when tolls should be avoided and the route
/// carries a toll cost, and gains `0.1 * time_score` when `fastest` is
/// requested. The result is clamped to `0.0..=1.0`. `time_score` must come
/// from the same batch normalisation as the route's breakdown.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "accumulates preference adjustments")]
pub fn preference_score(route: &CandidateRoute, preferences: &PreferenceSet, time_score: f64) -> f64 {
    let mut score = 1.0;
    if preferences.contains(Preference::AvoidToll) && route.has_tolls() {
        score -= TOLL_PENALTY;
    }
    if preferences.contains(Preference::Fastest) {
        score += FASTEST_BONUS * time_score;
    }
    score.clamp(0.0, 1.0)
}

/// Weighted dot product of `breakdown` and `weights`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "weighted sum of sub-scores")]
pub fn composite_score(breakdown: &ScoreBreakdown, weights: &WeightProfile) -> f64 {
    breakdown.time_score * weights.time
        + breakdown.distance_score * weights.distance
        + breakdown.traffic_score * weights.traffic
        + breakdown.weather_score * weights.weather
        + breakdown.preference_score * weights.preference
}
