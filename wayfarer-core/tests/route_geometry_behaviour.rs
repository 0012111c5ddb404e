//! Behavioural tests for the geometry used to watch a route for hazards.

use std::cell::RefCell;

use geo::{Coord, Rect};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfarer_core::{EARTH_RADIUS_M, GeoError, bounding_box, distance_to_polyline};

/// Shared state for route geometry scenarios.
#[derive(Default)]
pub struct World {
    route: RefCell<Vec<Coord<f64>>>,
    hazard: RefCell<Option<Coord<f64>>>,
    region: RefCell<Option<Result<Rect<f64>, GeoError>>>,
}

#[fixture]
/// Build an empty world.
pub fn world() -> World {
    World::default()
}

fn approx(left: f64, right: f64) -> bool {
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    let delta = (left - right).abs();
    delta < 1e-9
}

#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn hazard_distance(world: &World) -> f64 {
    let hazard = world.hazard.borrow().expect("hazard reported");
    distance_to_polyline(hazard, &world.route.borrow()).expect("route has coordinates")
}

#[given("a route running east along the equator")]
fn equator_route(world: &World) {
    *world.route.borrow_mut() = vec![
        Coord { x: 0.0, y: 0.0 },
        Coord { x: 0.05, y: 0.0 },
        Coord { x: 0.1, y: 0.0 },
    ];
}

#[given("a route with no coordinates")]
fn empty_route(world: &World) {
    world.route.borrow_mut().clear();
}

#[when("a hazard is reported {metres} metres north of its midpoint")]
#[expect(clippy::float_arithmetic, reason = "test geometry converts metres to degrees")]
fn hazard_north_of_midpoint(world: &World, metres: f64) {
    let degrees = metres / EARTH_RADIUS_M.to_radians();
    *world.hazard.borrow_mut() = Some(Coord {
        x: 0.05,
        y: degrees,
    });
}

#[when("the search region is padded by {padding} degrees")]
fn pad_region(world: &World, padding: f64) {
    let region = bounding_box(&world.route.borrow(), padding);
    *world.region.borrow_mut() = Some(region);
}

#[then("the hazard lies within {threshold} metres of the route")]
fn hazard_within(world: &World, threshold: f64) {
    let distance = hazard_distance(world);
    assert!(distance < threshold, "hazard was {distance} m away");
}

#[then("the hazard lies beyond {threshold} metres of the route")]
fn hazard_beyond(world: &World, threshold: f64) {
    let distance = hazard_distance(world);
    assert!(distance >= threshold, "hazard was {distance} m away");
}

#[then("the region spans longitudes {west} to {east}")]
fn region_spans(world: &World, west: f64, east: f64) {
    let region = world.region.borrow();
    let Some(Ok(rect)) = region.as_ref() else {
        panic!("expected a region, got {region:?}");
    };
    assert!(approx(rect.min().x, west), "west edge was {}", rect.min().x);
    assert!(approx(rect.max().x, east), "east edge was {}", rect.max().x);
    assert!(approx(rect.min().y, -0.01) && approx(rect.max().y, 0.01));
}

#[then("no region can be computed")]
fn no_region(world: &World) {
    assert_eq!(*world.region.borrow(), Some(Err(GeoError::EmptyInput)));
}

#[scenario(path = "tests/features/route_geometry.feature", index = 0)]
fn hazard_beside_route(world: World) {
    let _ = world;
}

#[scenario(path = "tests/features/route_geometry.feature", index = 1)]
fn distant_hazard(world: World) {
    let _ = world;
}

#[scenario(path = "tests/features/route_geometry.feature", index = 2)]
fn padded_region(world: World) {
    let _ = world;
}

#[scenario(path = "tests/features/route_geometry.feature", index = 3)]
fn empty_route_region(world: World) {
    let _ = world;
}
