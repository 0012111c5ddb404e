//! Congestion evaluation of a single route against a traffic snapshot.

use wayfarer_core::traffic::{STATUS_CONGESTED, STATUS_SEVERE};
use wayfarer_core::{CandidateRoute, TrafficSnapshot, distance_to_polyline};

/// Penalty for each congested road near the route.
const CONGESTED_PENALTY: f64 = 0.1;
/// Penalty for each severely congested road near the route.
const SEVERE_PENALTY: f64 = 0.2;

/// Traffic sub-score for `route` under `snapshot`.
///
/// Starts from the free-flow share of the region, then subtracts a penalty
/// for every congested road within `threshold_m` of the polyline. Roads with
/// a non-finite location are ignored.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use wayfarer_core::{CandidateRoute, RoadCondition, TrafficSnapshot};
/// use wayfarer_scorer::congestion_score;
///
/// let route = CandidateRoute::new(
///     "r",
///     1_100.0,
///     Duration::from_secs(120),
///     vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }],
/// );
/// let snapshot = TrafficSnapshot {
///     overall_congestion_rate: 20.0,
///     roads: vec![RoadCondition {
///         name: "Bridge St".into(),
///         status: 4,
///         location: Coord { x: 0.005, y: 0.0 },
///     }],
///     incidents: Vec::new(),
/// };
/// let score = congestion_score(&route, &snapshot, 500.0);
/// assert!((score - 0.6).abs() < 1e-9);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "accumulates congestion penalties")]
pub fn congestion_score(route: &CandidateRoute, snapshot: &TrafficSnapshot, threshold_m: f64) -> f64 {
    let rate = snapshot.overall_congestion_rate.clamp(0.0, 100.0);
    let rate_share = if rate.is_finite() { rate / 100.0 } else { 0.0 };
    let penalty: f64 = snapshot
        .roads
        .iter()
        .filter(|road| {
            distance_to_polyline(road.location, &route.polyline)
                .is_some_and(|distance| distance < threshold_m)
        })
        .map(|road| match road.status {
            STATUS_SEVERE.. => SEVERE_PENALTY,
            STATUS_CONGESTED => CONGESTED_PENALTY,
            _ => 0.0,
        })
        .sum();
    (1.0 - rate_share - penalty).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayfarer_core::test_support::{candidate, congested_road};

    fn snapshot(rate: f64, roads: Vec<wayfarer_core::RoadCondition>) -> TrafficSnapshot {
        TrafficSnapshot {
            overall_congestion_rate: rate,
            roads,
            incidents: Vec::new(),
        }
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(35.0, 0.65)]
    #[case(100.0, 0.0)]
    #[case(250.0, 0.0)]
    fn rate_reduces_score(#[case] rate: f64, #[case] expected: f64) {
        let route = candidate("r", 1_000.0, 60);
        let score = congestion_score(&route, &snapshot(rate, Vec::new()), 500.0);
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn only_nearby_congested_roads_are_penalised() {
        let route = candidate("r", 1_000.0, 60);
        let roads = vec![
            congested_road("near severe", 4, 0.004, 0.001),
            congested_road("near congested", 3, 0.002, 0.0),
            congested_road("near slow", 2, 0.002, 0.0),
            congested_road("far severe", 4, 0.004, 0.5),
            congested_road("nowhere", 4, f64::NAN, 0.0),
        ];
        let score = congestion_score(&route, &snapshot(10.0, roads), 500.0);
        assert!((score - 0.6).abs() < 1e-9, "got {score}");
    }
}
