//! `RoutePlanner` orchestration over the collaborator traits.
//!
//! Path candidates are fetched once, then traffic is fetched per candidate
//! and weather once at the origin, concurrently. Collaborator failures never
//! fail a plan: the affected sub-score falls back to its neutral value.

use std::future::Future;
use std::time::Duration;

use futures_util::future::{join, join_all};
use wayfarer_core::{
    CandidateRoute, CollaboratorError, PathSource, PoiSource, PointOfInterest, PreferenceSet,
    TrafficSource, WeatherImpact, WeatherSource, bounding_box,
};
use wayfarer_scorer::{RouteSignals, ScoredRoute, congestion_score, rank};

use crate::{PlanError, PlanRequest, PlanResult, PlannerConfig};

/// Recommends a route by ranking path-source candidates under live signals.
///
/// The planner is generic over its four collaborators. Use
/// [`Unconfigured`](wayfarer_core::Unconfigured) for a provider that is not
/// available; its failures are absorbed like any other.
#[derive(Debug)]
pub struct RoutePlanner<P, T, W, I>
where
    P: PathSource,
    T: TrafficSource,
    W: WeatherSource,
    I: PoiSource,
{
    paths: P,
    traffic: T,
    weather: W,
    pois: I,
    config: PlannerConfig,
}

impl<P, T, W, I> RoutePlanner<P, T, W, I>
where
    P: PathSource,
    T: TrafficSource,
    W: WeatherSource,
    I: PoiSource,
{
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new(paths: P, traffic: T, weather: W, pois: I) -> Self {
        Self::with_config(paths, traffic, weather, pois, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(
        paths: P,
        traffic: T,
        weather: W,
        pois: I,
        config: PlannerConfig,
    ) -> Self {
        Self {
            paths,
            traffic,
            weather,
            pois,
            config,
        }
    }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Fetch candidates from the path source and rank them.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] for non-finite endpoints,
    /// [`PlanError::PathSource`] when the path source fails or times out, and
    /// [`PlanError::NoCandidates`] when it returns nothing usable.
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        request.validate()?;
        let strategy = request.preferences.strategy();
        let candidates = bounded(
            "path source",
            self.config.collaborator_timeout,
            self.paths.plan_paths(
                request.origin,
                request.destination,
                request.mode,
                strategy,
            ),
        )
        .await?;
        log::debug!(
            "path source returned {} candidates for {} travel",
            candidates.len(),
            request.mode
        );
        self.plan_with_candidates(request, candidates).await
    }

    /// Rank caller-supplied candidates under live signals.
    ///
    /// Candidates that fail validation are dropped with a warning, and at
    /// most `max_candidates` are kept in source order.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] for non-finite endpoints and
    /// [`PlanError::NoCandidates`] when no usable candidate remains.
    pub async fn plan_with_candidates(
        &self,
        request: &PlanRequest,
        candidates: Vec<CandidateRoute>,
    ) -> Result<PlanResult, PlanError> {
        request.validate()?;
        let usable = self.usable(candidates);
        if usable.is_empty() {
            return Err(PlanError::NoCandidates);
        }

        let (traffic_scores, weather) =
            join(self.traffic_scores(&usable), self.weather_at(request)).await;
        let weather_score = weather.map_or(self.config.neutral_weather_score, |impact| {
            weather_score(&impact)
        });
        let batch = usable
            .into_iter()
            .zip(traffic_scores)
            .map(|(route, traffic_score)| (route, RouteSignals::new(traffic_score, weather_score)))
            .collect();
        let routes = rank(batch, &request.preferences)?;
        let pois = self.pois_along(&routes, &request.preferences).await;
        Ok(PlanResult {
            routes,
            pois,
            weather,
        })
    }

    fn usable(&self, candidates: Vec<CandidateRoute>) -> Vec<CandidateRoute> {
        let mut usable: Vec<CandidateRoute> = candidates
            .into_iter()
            .filter(|route| match route.validate() {
                Ok(()) => true,
                Err(error) => {
                    log::warn!("dropping candidate: {error}");
                    false
                }
            })
            .collect();
        usable.truncate(self.config.max_candidates);
        usable
    }

    async fn traffic_scores(&self, routes: &[CandidateRoute]) -> Vec<f64> {
        if !self.config.consider_traffic {
            return vec![self.config.neutral_traffic_score; routes.len()];
        }
        join_all(routes.iter().map(|route| self.traffic_score(route))).await
    }

    async fn traffic_score(&self, route: &CandidateRoute) -> f64 {
        let region = match bounding_box(&route.polyline, self.config.region_padding_deg) {
            Ok(region) => region,
            Err(error) => {
                log::warn!("no traffic region for route {}: {error}", route.id);
                return self.config.neutral_traffic_score;
            }
        };
        let fetched = bounded(
            "traffic",
            self.config.collaborator_timeout,
            self.traffic.traffic_in_region(&region),
        )
        .await;
        match fetched {
            Ok(snapshot) => congestion_score(route, &snapshot, self.config.congestion_threshold_m),
            Err(error) => {
                log::warn!(
                    "traffic unavailable for route {}, using neutral score: {error}",
                    route.id
                );
                self.config.neutral_traffic_score
            }
        }
    }

    async fn weather_at(&self, request: &PlanRequest) -> Option<WeatherImpact> {
        if !self.config.consider_weather {
            return None;
        }
        let fetched = bounded(
            "weather",
            self.config.collaborator_timeout,
            self.weather.current_weather(request.origin),
        )
        .await;
        match fetched {
            Ok(reading) => Some(self.weather.impact_of(&reading)),
            Err(error) => {
                log::warn!("weather unavailable, using neutral score: {error}");
                None
            }
        }
    }

    async fn pois_along(
        &self,
        routes: &[ScoredRoute],
        preferences: &PreferenceSet,
    ) -> Vec<PointOfInterest> {
        let categories = preferences.poi_categories();
        let Some(top) = routes.first() else {
            return Vec::new();
        };
        if categories.is_empty() {
            return Vec::new();
        }
        let fetched = bounded(
            "poi",
            self.config.collaborator_timeout,
            self.pois.pois_near(&top.route.polyline, &categories),
        )
        .await;
        fetched.unwrap_or_else(|error| {
            log::warn!("points of interest unavailable: {error}");
            Vec::new()
        })
    }
}

#[expect(clippy::float_arithmetic, reason = "inverts the impact factor")]
fn weather_score(impact: &WeatherImpact) -> f64 {
    (1.0 - impact.impact).clamp(0.0, 1.0)
}

async fn bounded<R>(
    collaborator: &str,
    limit: Duration,
    call: impl Future<Output = Result<R, CollaboratorError>>,
) -> Result<R, CollaboratorError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(CollaboratorError::timeout(collaborator, limit)))
}

#[cfg(test)]
mod tests;
