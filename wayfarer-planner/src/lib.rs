//! Route planning for Wayfarer.
//!
//! [`RoutePlanner`] asks a path source for candidate routes between two
//! points, gathers live traffic and weather for them, and ranks the batch
//! with `wayfarer-scorer`. Planning succeeds whenever at least one usable
//! candidate exists: traffic, weather and POI failures degrade to neutral
//! values instead of surfacing as errors.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use std::time::Duration;
//! use wayfarer_core::{CandidateRoute, TravelMode, Unconfigured};
//! use wayfarer_planner::{PlanRequest, RoutePlanner};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), wayfarer_planner::PlanError> {
//! let planner = RoutePlanner::new(Unconfigured, Unconfigured, Unconfigured, Unconfigured);
//! let request = PlanRequest::new(
//!     Coord { x: -0.12, y: 51.50 },
//!     Coord { x: -0.10, y: 51.52 },
//!     TravelMode::Drive,
//! );
//! let candidate = CandidateRoute::new(
//!     "direct",
//!     2_600.0,
//!     Duration::from_secs(420),
//!     vec![request.origin, request.destination],
//! );
//! let result = planner.plan_with_candidates(&request, vec![candidate]).await?;
//! assert_eq!(result.recommended().map(|r| r.route.id.as_str()), Some("direct"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod planner;
mod request;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use planner::RoutePlanner;
pub use request::{PlanRequest, PlanResult};
