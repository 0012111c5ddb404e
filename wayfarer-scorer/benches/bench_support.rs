//! Deterministic candidate batches for ranking benchmarks.

use std::time::Duration;

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wayfarer_core::CandidateRoute;
use wayfarer_scorer::RouteSignals;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Number of polyline vertices per generated route.
const POLYLINE_POINTS: usize = 64;

/// Generate `count` candidates with random distance, duration, tolls and signals.
#[must_use]
pub fn generate_batch(count: usize, seed: u64) -> Vec<(CandidateRoute, RouteSignals)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|index| {
            let distance_m: f64 = rng.gen_range(5_000.0..40_000.0);
            let duration = Duration::from_secs(rng.gen_range(600..3_600));
            let polyline = (0..POLYLINE_POINTS)
                .map(|_| Coord {
                    x: rng.gen_range(-0.1..0.1),
                    y: rng.gen_range(51.4..51.6),
                })
                .collect();
            let toll_cost = if rng.gen_bool(0.3) {
                rng.gen_range(100.0..2_000.0)
            } else {
                0.0
            };
            let route = CandidateRoute::new(format!("route-{index}"), distance_m, duration, polyline)
                .with_toll_cost(toll_cost);
            let signals = RouteSignals::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
            (route, signals)
        })
        .collect()
}
