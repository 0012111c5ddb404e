//! HTTP-based `PathSource` using OSRM's Route API.
//!
//! This module provides [`HttpPathSource`], an implementation of the
//! [`PathSource`] trait that asks an OSRM routing service for a route and its
//! alternatives, then validates each one into a [`CandidateRoute`].

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use reqwest::Client;
use thiserror::Error;
use url::Url;
use wayfarer_core::{
    CandidateRoute, CollaboratorError, PathSource, RouteStep, RouteStrategy, TravelMode,
};

use super::osrm::{OsrmRoute, RouteResponse, Step};

/// Error type for [`HttpPathSource`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The base URL could not be used to build route requests.
    #[error("invalid OSRM base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "wayfarer-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of routes requested, including the primary one.
const DEFAULT_ALTERNATIVES: u8 = 3;

/// Configuration for [`HttpPathSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPathSourceConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum number of routes to request, including the primary one.
    pub alternatives: u8,
}

impl Default for HttpPathSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            alternatives: DEFAULT_ALTERNATIVES,
        }
    }
}

impl HttpPathSourceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how many routes to request.
    #[must_use]
    pub const fn with_alternatives(mut self, alternatives: u8) -> Self {
        self.alternatives = alternatives;
        self
    }
}

/// HTTP-based path source using the OSRM Route API.
///
/// # Supported travel modes
///
/// Drive, walk and ride map to the `driving`, `foot` and `cycling` profiles.
/// Transit has no OSRM profile and fails with
/// [`CollaboratorError::UnsupportedMode`] without making a request.
///
/// # Example
///
/// ```no_run
/// use geo::Coord;
/// use wayfarer_core::{PathSource, RouteStrategy, TravelMode};
/// use wayfarer_data::routing::HttpPathSource;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpPathSource::new("http://localhost:5000")?;
/// let routes = source
///     .plan_paths(
///         Coord { x: -0.1, y: 51.5 },
///         Coord { x: -0.2, y: 51.6 },
///         TravelMode::Drive,
///         RouteStrategy::default(),
///     )
///     .await?;
/// assert!(!routes.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpPathSource {
    client: Client,
    base_url: Url,
    config: HttpPathSourceConfig,
}

impl HttpPathSource {
    /// Create a new source with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpPathSourceConfig::new(base_url))
    }

    /// Create a new source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpPathSourceConfig) -> Result<Self, ProviderBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|err| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: err.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: "URL cannot carry a path".to_owned(),
            });
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Return the configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpPathSourceConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for one request.
    ///
    /// The URL format is: `{base_url}/route/v1/{profile}/{lng,lat;lng,lat}`
    /// followed by the query options.
    fn build_route_url(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
        strategy: RouteStrategy,
    ) -> Result<Url, CollaboratorError> {
        let profile = profile_for(mode)?;
        let coordinates = format!(
            "{},{};{},{}",
            origin.x, origin.y, destination.x, destination.y
        );
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CollaboratorError::ConfigurationMissing { collaborator: "path" })?
            .pop_if_empty()
            .extend(["route", "v1", profile, coordinates.as_str()]);

        let alternatives = match self.config.alternatives {
            0 | 1 => "false".to_owned(),
            count => count.to_string(),
        };
        let mut query = format!(
            "alternatives={alternatives}&steps=true&geometries=geojson&overview=full"
        );
        let excluded = excluded_classes(mode, strategy);
        if !excluded.is_empty() {
            query.push_str("&exclude=");
            query.push_str(&excluded.join(","));
        }
        url.set_query(Some(&query));
        Ok(url)
    }

    /// Fetch and validate routes.
    async fn fetch_routes(
        &self,
        url: &Url,
        strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
        log::debug!("requesting routes from {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let route_response: RouteResponse =
            serde_json::from_str(&body).map_err(|err| CollaboratorError::MalformedSnapshot {
                message: err.to_string(),
            })?;

        convert_response(route_response, strategy)
    }

    /// Convert a reqwest error to a `CollaboratorError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> CollaboratorError {
        if error.is_timeout() {
            return CollaboratorError::timeout(url, self.config.timeout);
        }

        if let Some(status) = error.status() {
            return CollaboratorError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        CollaboratorError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl PathSource for HttpPathSource {
    async fn plan_paths(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
        strategy: RouteStrategy,
    ) -> Result<Vec<CandidateRoute>, CollaboratorError> {
        let url = self.build_route_url(origin, destination, mode, strategy)?;
        self.fetch_routes(&url, strategy).await
    }
}

/// OSRM profile serving `mode`.
const fn profile_for(mode: TravelMode) -> Result<&'static str, CollaboratorError> {
    match mode {
        TravelMode::Drive => Ok("driving"),
        TravelMode::Walk => Ok("foot"),
        TravelMode::Ride => Ok("cycling"),
        TravelMode::Transit => Err(CollaboratorError::UnsupportedMode { mode }),
    }
}

/// Road classes to exclude; only the driving profile defines them.
fn excluded_classes(mode: TravelMode, strategy: RouteStrategy) -> Vec<&'static str> {
    if mode != TravelMode::Drive {
        return Vec::new();
    }
    [
        (strategy.avoid_tolls, "toll"),
        (strategy.avoid_highways, "motorway"),
    ]
    .into_iter()
    .filter_map(|(wanted, class)| wanted.then_some(class))
    .collect()
}

/// Convert an OSRM response into validated candidates.
///
/// `NoRoute` yields an empty batch; other failure codes become
/// [`CollaboratorError::Service`]. Under a shortest strategy the routes are
/// reordered by distance, since OSRM always ranks by duration.
fn convert_response(
    response: RouteResponse,
    strategy: RouteStrategy,
) -> Result<Vec<CandidateRoute>, CollaboratorError> {
    if response.is_no_route() {
        log::debug!("OSRM found no route");
        return Ok(Vec::new());
    }
    if !response.is_ok() {
        return Err(CollaboratorError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let routes = response
        .routes
        .ok_or_else(|| CollaboratorError::MalformedSnapshot {
            message: "OSRM response missing routes array".to_owned(),
        })?;
    let mut candidates = routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| convert_route(index, route))
        .collect::<Result<Vec<_>, _>>()?;
    if strategy.shortest {
        candidates.sort_by(|left, right| left.distance_m.total_cmp(&right.distance_m));
    }
    Ok(candidates)
}

fn convert_route(index: usize, route: OsrmRoute) -> Result<CandidateRoute, CollaboratorError> {
    let id = format!("osrm-{index}");
    let duration = seconds(route.duration)
        .ok_or_else(|| malformed(&id, &format!("invalid duration {}", route.duration)))?;
    let polyline = route
        .geometry
        .coordinates
        .iter()
        .map(|&[x, y]| Coord { x, y })
        .collect();
    let steps: Vec<&Step> = route.legs.iter().flat_map(|leg| &leg.steps).collect();
    let toll_distance: f64 = steps
        .iter()
        .filter(|step| step.is_tolled())
        .map(|step| step.distance)
        .sum();
    let route_steps = steps
        .iter()
        .map(|step| RouteStep {
            instruction: instruction_for(step),
            distance_m: step.distance,
            duration: seconds(step.duration).unwrap_or(Duration::ZERO),
        })
        .collect();

    let candidate = CandidateRoute::new(id, route.distance, duration, polyline)
        .with_toll_cost(toll_distance)
        .with_steps(route_steps);
    candidate
        .validate()
        .map_err(|err| malformed(&candidate.id, &err.to_string()))?;
    Ok(candidate)
}

fn seconds(value: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(value).ok()
}

fn malformed(id: &str, detail: &str) -> CollaboratorError {
    CollaboratorError::MalformedSnapshot {
        message: format!("route {id}: {detail}"),
    }
}

/// Render a manoeuvre as a short instruction.
fn instruction_for(step: &Step) -> String {
    let kind = step.maneuver.kind.as_str();
    let road = step.name.trim();
    match (kind, road) {
        ("arrive", _) => "arrive at destination".to_owned(),
        ("depart", "") => "depart".to_owned(),
        ("depart", _) => format!("head along {road}"),
        _ => {
            let action = step
                .maneuver
                .modifier
                .as_deref()
                .map_or_else(|| kind.to_owned(), |modifier| format!("{kind} {modifier}"));
            if road.is_empty() {
                action
            } else {
                format!("{action} onto {road}")
            }
        }
    }
}
