//! Batch ranking of candidate routes.

use wayfarer_core::{CandidateRoute, PreferenceSet};

use crate::{
    RankError, ScoreBreakdown, composite_score, normalize, preference_score, weight_profile,
};

/// Traffic score used when congestion is not evaluated.
pub const NEUTRAL_TRAFFIC_SCORE: f64 = 0.8;
/// Weather score used when weather is not evaluated.
pub const NEUTRAL_WEATHER_SCORE: f64 = 1.0;

/// Live signals gathered for one candidate before ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSignals {
    /// Traffic sub-score in `0.0..=1.0`.
    pub traffic_score: f64,
    /// Weather sub-score in `0.0..=1.0`.
    pub weather_score: f64,
}

impl RouteSignals {
    /// Construct signals from explicit sub-scores.
    #[must_use]
    pub const fn new(traffic_score: f64, weather_score: f64) -> Self {
        Self {
            traffic_score,
            weather_score,
        }
    }

    /// Signals used when neither traffic nor weather was consulted.
    #[must_use]
    pub const fn neutral() -> Self {
        Self::new(NEUTRAL_TRAFFIC_SCORE, NEUTRAL_WEATHER_SCORE)
    }
}

impl Default for RouteSignals {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A candidate annotated with its scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredRoute {
    /// The scored candidate.
    pub route: CandidateRoute,
    /// Sub-scores computed against the batch.
    pub breakdown: ScoreBreakdown,
    /// Weighted composite used for ordering.
    pub composite_score: f64,
    /// Whether this candidate is the recommendation.
    pub recommended: bool,
}

/// Score and order a batch of candidates.
///
/// Time and distance are normalised against this batch only. The result is
/// sorted by composite score, highest first; equal scores keep their input
/// order. Exactly the first entry is marked as recommended.
///
/// # Errors
/// Returns [`RankError::NoCandidates`] when `batch` is empty.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{CandidateRoute, PreferenceSet};
/// use wayfarer_scorer::{RouteSignals, rank};
///
/// let path = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.0 }];
/// let slow = CandidateRoute::new("slow", 11_000.0, Duration::from_secs(1_620), path.clone());
/// let quick = CandidateRoute::new("quick", 13_000.0, Duration::from_secs(1_400), path);
///
/// let ranked = rank(
///     vec![(slow, RouteSignals::neutral()), (quick, RouteSignals::neutral())],
///     &PreferenceSet::new(),
/// )?;
/// assert_eq!(ranked.iter().filter(|scored| scored.recommended).count(), 1);
/// # Ok::<(), wayfarer_scorer::RankError>(())
/// ```
pub fn rank(
    batch: Vec<(CandidateRoute, RouteSignals)>,
    preferences: &PreferenceSet,
) -> Result<Vec<ScoredRoute>, RankError> {
    if batch.is_empty() {
        return Err(RankError::NoCandidates);
    }
    let durations: Vec<f64> = batch
        .iter()
        .map(|(route, _)| route.duration.as_secs_f64())
        .collect();
    let distances: Vec<f64> = batch.iter().map(|(route, _)| route.distance_m).collect();
    let weights = weight_profile(preferences);

    let mut scored: Vec<ScoredRoute> = batch
        .into_iter()
        .map(|(route, signals)| {
            let time_score = normalize(&durations, route.duration.as_secs_f64(), true);
            let distance_score = normalize(&distances, route.distance_m, true);
            let breakdown = ScoreBreakdown {
                time_score,
                distance_score,
                traffic_score: signals.traffic_score.clamp(0.0, 1.0),
                weather_score: signals.weather_score.clamp(0.0, 1.0),
                preference_score: preference_score(&route, preferences, time_score),
            };
            ScoredRoute {
                composite_score: composite_score(&breakdown, &weights),
                route,
                breakdown,
                recommended: false,
            }
        })
        .collect();

    scored.sort_by(|left, right| right.composite_score.total_cmp(&left.composite_score));
    if let Some(top) = scored.first_mut() {
        top.recommended = true;
        log::debug!(
            "recommended route {} with composite score {:.3}",
            top.route.id,
            top.composite_score
        );
    }
    Ok(scored)
}
