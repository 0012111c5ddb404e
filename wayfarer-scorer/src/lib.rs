//! Route scoring for Wayfarer.
//!
//! Candidate routes are compared on five sub-scores, each in `0.0..=1.0`:
//! journey time and distance (normalised against the current batch), traffic
//! congestion, weather suitability, and fit with the traveller's
//! preferences. A [`WeightProfile`] chosen from the preference set folds
//! them into one composite score, and [`rank`] orders a batch by that score
//! and flags the top entry as the recommendation.
//!
//! Everything here is pure and synchronous; callers gather live signals
//! first and hand them in as [`RouteSignals`].

#![forbid(unsafe_code)]

mod congestion;
mod error;
mod rank;
mod score;
mod weights;


pub use congestion::congestion_score;
pub use error::RankError;
pub use rank::{NEUTRAL_TRAFFIC_SCORE, NEUTRAL_WEATHER_SCORE, RouteSignals, ScoredRoute, rank};
pub use score::{ScoreBreakdown, composite_score, normalize, preference_score};
pub use weights::{WeightProfile, weight_profile};
