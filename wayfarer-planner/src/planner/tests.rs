//! Unit coverage for planner orchestration and fallbacks.

use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, Rect};
use rstest::{fixture, rstest};
use wayfarer_core::test_support::{
    StubPathSource, StubPoiSource, StubTrafficSource, StubWeatherSource, candidate,
    congested_road,
};
use wayfarer_core::{
    CandidateRoute, CollaboratorError, PoiCategory, PointOfInterest, Preference, TrafficSnapshot,
    TrafficSource, TravelMode, Unconfigured, WeatherCategory, WeatherReading,
};

use super::RoutePlanner;
use crate::{PlanError, PlanRequest, PlannerConfig};

type StubPlanner =
    RoutePlanner<StubPathSource, StubTrafficSource, StubWeatherSource, StubPoiSource>;

#[fixture]
fn request() -> PlanRequest {
    PlanRequest::new(
        Coord { x: 0.0, y: 0.0 },
        Coord { x: 0.01, y: 0.0 },
        TravelMode::Drive,
    )
}

fn clear_sky() -> StubWeatherSource {
    StubWeatherSource::with_reading(WeatherReading::new("clear", 18.0, 2))
}

fn free_flow() -> StubTrafficSource {
    StubTrafficSource::with_snapshot(TrafficSnapshot::default())
}

fn planner(paths: StubPathSource, traffic: StubTrafficSource, weather: StubWeatherSource) -> StubPlanner {
    RoutePlanner::new(paths, traffic, weather, StubPoiSource::default())
}

#[rstest]
#[tokio::test]
async fn plans_from_path_source(request: PlanRequest) {
    let paths = StubPathSource::with_routes(vec![
        candidate("slow", 1_000.0, 300),
        candidate("quick", 1_000.0, 200),
    ]);
    let planner = planner(paths, free_flow(), clear_sky());

    let result = planner.plan(&request).await.expect("plan succeeds");

    assert_eq!(result.routes.len(), 2);
    assert_eq!(
        result.recommended().map(|scored| scored.route.id.as_str()),
        Some("quick")
    );
    assert_eq!(
        result.weather.map(|impact| impact.category),
        Some(WeatherCategory::Clear)
    );
}

#[rstest]
#[tokio::test]
async fn path_source_failure_is_reported(request: PlanRequest) {
    let error = CollaboratorError::Service {
        code: "NoRoute".into(),
        message: "no route found".into(),
    };
    let planner = planner(
        StubPathSource::with_error(error.clone()),
        free_flow(),
        clear_sky(),
    );

    assert_eq!(planner.plan(&request).await, Err(PlanError::PathSource(error)));
}

#[rstest]
#[tokio::test]
async fn empty_path_batch_has_no_candidates(request: PlanRequest) {
    let planner = planner(StubPathSource::with_routes(Vec::new()), free_flow(), clear_sky());
    assert_eq!(planner.plan(&request).await, Err(PlanError::NoCandidates));
}

#[rstest]
#[tokio::test]
async fn invalid_candidates_are_dropped(request: PlanRequest) {
    let broken = CandidateRoute::new(
        "broken",
        f64::NAN,
        Duration::from_secs(10),
        vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.0 }],
    );
    let planner = planner(StubPathSource::with_routes(Vec::new()), free_flow(), clear_sky());

    let result = planner
        .plan_with_candidates(&request, vec![broken.clone(), candidate("ok", 1_000.0, 60)])
        .await
        .expect("one usable candidate");
    assert_eq!(result.routes.len(), 1);

    assert_eq!(
        planner.plan_with_candidates(&request, vec![broken]).await,
        Err(PlanError::NoCandidates)
    );
}

#[rstest]
#[tokio::test]
async fn candidates_are_capped(request: PlanRequest) {
    let batch = (0..5)
        .map(|index| candidate(&format!("r{index}"), 1_000.0, 60 + index))
        .collect();
    let planner = planner(StubPathSource::with_routes(batch), free_flow(), clear_sky());

    let result = planner.plan(&request).await.expect("plan succeeds");

    assert_eq!(result.routes.len(), 3);
    assert!(result.routes.iter().all(|scored| scored.route.id != "r3"));
}

#[rstest]
#[tokio::test]
async fn nearby_congestion_lowers_traffic_score(request: PlanRequest) {
    let snapshot = TrafficSnapshot {
        overall_congestion_rate: 20.0,
        roads: vec![congested_road("Ring Road", 4, 0.004, 0.0)],
        incidents: Vec::new(),
    };
    let traffic = StubTrafficSource::with_snapshot(snapshot);
    let planner = planner(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        traffic,
        clear_sky(),
    );

    let result = planner.plan(&request).await.expect("plan succeeds");
    let top = result.recommended().expect("recommendation");

    assert!((top.breakdown.traffic_score - 0.6).abs() < 1e-9);
}

#[rstest]
#[tokio::test]
async fn collaborator_failures_fall_back_to_neutral_scores(request: PlanRequest) {
    let planner = RoutePlanner::new(
        StubPathSource::with_routes(vec![candidate("a", 1_000.0, 60), candidate("b", 900.0, 70)]),
        Unconfigured,
        Unconfigured,
        Unconfigured,
    );

    let result = planner.plan(&request).await.expect("plan succeeds");

    assert!(result.weather.is_none());
    for scored in &result.routes {
        assert!((scored.breakdown.traffic_score - 0.8).abs() < 1e-9);
        assert!((scored.breakdown.weather_score - 1.0).abs() < 1e-9);
    }
}

#[rstest]
#[tokio::test]
async fn bad_weather_lowers_weather_score(request: PlanRequest) {
    let weather = StubWeatherSource::with_reading(WeatherReading::new("heavy rain", 12.0, 3));
    let planner = planner(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        free_flow(),
        weather,
    );

    let result = planner.plan(&request).await.expect("plan succeeds");
    let top = result.recommended().expect("recommendation");

    assert!((top.breakdown.weather_score - 0.5).abs() < 1e-9);
}

#[rstest]
#[tokio::test]
async fn disabled_signals_are_not_requested(request: PlanRequest) {
    let traffic = StubTrafficSource::with_snapshot(TrafficSnapshot::default());
    let weather = clear_sky();
    let config = PlannerConfig::default()
        .with_traffic(false)
        .with_weather(false);
    let planner = RoutePlanner::with_config(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        traffic,
        weather,
        StubPoiSource::default(),
        config,
    );

    let result = planner.plan(&request).await.expect("plan succeeds");

    assert!(result.weather.is_none());
    assert_eq!(planner.traffic.calls(), 0);
    assert_eq!(planner.weather.calls(), 0);
}

#[rstest]
#[tokio::test]
async fn traffic_is_requested_once_per_candidate(request: PlanRequest) {
    let planner = planner(
        StubPathSource::with_routes(vec![
            candidate("a", 1_000.0, 60),
            candidate("b", 1_200.0, 70),
            candidate("c", 1_400.0, 80),
        ]),
        free_flow(),
        clear_sky(),
    );

    planner.plan(&request).await.expect("plan succeeds");

    assert_eq!(planner.traffic.calls(), 3);
    assert!(
        planner
            .traffic
            .regions()
            .iter()
            .all(|region| region.min().x < 0.0 && region.max().x > 0.0)
    );
}

struct StalledTraffic;

#[async_trait]
impl TrafficSource for StalledTraffic {
    async fn traffic_in_region(
        &self,
        _region: &Rect<f64>,
    ) -> Result<TrafficSnapshot, CollaboratorError> {
        tokio::time::sleep(Duration::from_secs(3_600)).await;
        Ok(TrafficSnapshot::default())
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn stalled_traffic_times_out_to_neutral(request: PlanRequest) {
    let planner = RoutePlanner::new(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        StalledTraffic,
        clear_sky(),
        StubPoiSource::default(),
    );

    let result = planner.plan(&request).await.expect("plan succeeds");
    let top = result.recommended().expect("recommendation");

    assert!((top.breakdown.traffic_score - 0.8).abs() < 1e-9);
}

#[rstest]
#[tokio::test]
async fn pois_decorate_recommended_route_when_requested(request: PlanRequest) {
    let fuel = PointOfInterest::new("p1", "Fuel stop", PoiCategory::Fuel, Coord { x: 0.005, y: 0.0 });
    let cafe = PointOfInterest::new("p2", "Cafe", PoiCategory::Food, Coord { x: 0.006, y: 0.0 });
    let planner = RoutePlanner::new(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        free_flow(),
        clear_sky(),
        StubPoiSource::with_pois(vec![fuel.clone(), cafe]),
    );

    let plain = planner.plan(&request).await.expect("plan succeeds");
    assert!(plain.pois.is_empty());

    let with_fuel = request.with_preferences(
        [Preference::Poi(PoiCategory::Fuel)].into_iter().collect(),
    );
    let decorated = planner.plan(&with_fuel).await.expect("plan succeeds");
    assert_eq!(decorated.pois, vec![fuel]);
}

#[rstest]
#[tokio::test]
async fn non_finite_endpoints_are_rejected(request: PlanRequest) {
    let bad = PlanRequest {
        destination: Coord {
            x: f64::INFINITY,
            y: 0.0,
        },
        ..request
    };
    let planner = planner(
        StubPathSource::with_routes(vec![candidate("r", 1_000.0, 60)]),
        free_flow(),
        clear_sky(),
    );

    assert!(matches!(
        planner.plan(&bad).await,
        Err(PlanError::InvalidRequest { .. })
    ));
}
