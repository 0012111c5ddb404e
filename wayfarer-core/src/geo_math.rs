//! Pure geometric helpers shared by route scoring and event monitoring.
//!
//! Distances are returned in metres. Segment projection uses an
//! equirectangular approximation which holds at the sub-kilometre scales of
//! route-proximity checks; it is not suitable for segments spanning large
//! latitude ranges.

use geo::{Coord, Rect};
use thiserror::Error;

/// Mean Earth radius used by the haversine formula, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Errors raised by geometric helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    /// No points were supplied to a reduction.
    #[error("at least one coordinate is required")]
    EmptyInput,
}

/// Great-circle distance between `a` and `b` in metres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::haversine_distance;
///
/// let a = Coord { x: 116.397, y: 39.908 };
/// assert_eq!(haversine_distance(a, a), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is floating-point trigonometry"
)]
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lng = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_M * c
}

/// Distance in metres from `point` to the segment `start..end`.
///
/// The point is projected onto the segment in a local flat-earth frame whose
/// longitude axis is scaled by the cosine of the segment's mean latitude. The
/// projection parameter is clamped to `0.0..=1.0`, so points beyond either end
/// measure to the nearest endpoint.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "segment projection is floating-point geometry"
)]
pub fn point_to_segment_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let metres_per_degree = EARTH_RADIUS_M.to_radians();
    let mean_lat = ((start.y + end.y) / 2.0).to_radians();
    let scale_x = metres_per_degree * mean_lat.cos();
    let scale_y = metres_per_degree;

    let px = (point.x - start.x) * scale_x;
    let py = (point.y - start.y) * scale_y;
    let dx = (end.x - start.x) * scale_x;
    let dy = (end.y - start.y) * scale_y;

    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        ((px * dx + py * dy) / length_sq).clamp(0.0, 1.0)
    };
    (px - t * dx).hypot(py - t * dy)
}

/// Smallest distance in metres from `point` to any segment of `polyline`.
///
/// A single-point polyline measures straight to that point. Returns `None`
/// for an empty polyline.
#[must_use]
pub fn distance_to_polyline(point: Coord<f64>, polyline: &[Coord<f64>]) -> Option<f64> {
    match polyline {
        [] => None,
        [only] => Some(haversine_distance(point, *only)),
        _ => polyline
            .windows(2)
            .filter_map(|pair| match pair {
                [start, end] => Some(point_to_segment_distance(point, *start, *end)),
                _ => None,
            })
            .reduce(f64::min),
    }
}

/// Total haversine length of `polyline` in metres.
#[must_use]
pub fn polyline_length(polyline: &[Coord<f64>]) -> f64 {
    polyline
        .windows(2)
        .filter_map(|pair| match pair {
            [start, end] => Some(haversine_distance(*start, *end)),
            _ => None,
        })
        .sum()
}

/// Axis-aligned bounds of `points`, grown by `padding_degrees` on every side.
///
/// # Errors
/// Returns [`GeoError::EmptyInput`] when `points` is empty; a degenerate box
/// is never fabricated.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{GeoError, bounding_box};
///
/// let points = [Coord { x: 1.0, y: 2.0 }, Coord { x: 3.0, y: 0.5 }];
/// let bbox = bounding_box(&points, 0.5)?;
/// assert_eq!(bbox.min(), Coord { x: 0.5, y: 0.0 });
/// assert_eq!(bbox.max(), Coord { x: 3.5, y: 2.5 });
/// assert_eq!(bounding_box(&[], 0.5), Err(GeoError::EmptyInput));
/// # Ok::<(), GeoError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "padding expands the bounds by a floating-point margin"
)]
pub fn bounding_box(points: &[Coord<f64>], padding_degrees: f64) -> Result<Rect<f64>, GeoError> {
    let (first, rest) = points.split_first().ok_or(GeoError::EmptyInput)?;
    let (min, max) = rest.iter().fold((*first, *first), |(min, max), point| {
        (
            Coord {
                x: min.x.min(point.x),
                y: min.y.min(point.y),
            },
            Coord {
                x: max.x.max(point.x),
                y: max.y.max(point.y),
            },
        )
    });
    Ok(Rect::new(
        Coord {
            x: min.x - padding_degrees,
            y: min.y - padding_degrees,
        },
        Coord {
            x: max.x + padding_degrees,
            y: max.y + padding_degrees,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const TOLERANCE_M: f64 = 1.0;

    #[rstest]
    fn distance_to_self_is_zero() {
        let point = Coord { x: -0.1276, y: 51.5072 };
        assert!(haversine_distance(point, point).abs() < f64::EPSILON);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 0.0, y: 1.0 };
        let distance = haversine_distance(a, b);
        assert!((distance - 111_194.9).abs() < 1.0, "got {distance}");
    }

    #[rstest]
    #[case::midpoint(Coord { x: 0.0005, y: 0.001 }, 111.19)]
    #[case::before_start(Coord { x: -0.001, y: 0.0 }, 111.19)]
    #[case::beyond_end(Coord { x: 0.002, y: 0.0 }, 111.19)]
    #[case::on_segment(Coord { x: 0.0005, y: 0.0 }, 0.0)]
    fn segment_distance_clamps_projection(#[case] point: Coord<f64>, #[case] expected: f64) {
        let start = Coord { x: 0.0, y: 0.0 };
        let end = Coord { x: 0.001, y: 0.0 };
        let distance = point_to_segment_distance(point, start, end);
        assert!(
            (distance - expected).abs() < TOLERANCE_M,
            "expected {expected}, got {distance}"
        );
    }

    #[rstest]
    fn degenerate_segment_measures_to_endpoint() {
        let start = Coord { x: 10.0, y: 45.0 };
        let point = Coord { x: 10.0, y: 45.001 };
        let distance = point_to_segment_distance(point, start, start);
        assert!((distance - 111.19).abs() < TOLERANCE_M, "got {distance}");
    }

    #[rstest]
    fn polyline_distance_picks_nearest_segment() {
        let polyline = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.01, y: 0.0 },
            Coord { x: 0.01, y: 0.01 },
        ];
        let point = Coord { x: 0.0105, y: 0.005 };
        let distance = distance_to_polyline(point, &polyline).expect("non-empty polyline");
        assert!(distance < 60.0, "got {distance}");
        assert!(distance_to_polyline(point, &[]).is_none());
    }

    #[rstest]
    fn polyline_length_sums_segments() {
        let polyline = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 2.0 },
        ];
        let length = polyline_length(&polyline);
        assert!((length - 222_389.8).abs() < 2.0, "got {length}");
        assert!(polyline_length(&polyline[..1]).abs() < f64::EPSILON);
    }

    #[rstest]
    fn bounding_box_rejects_empty_input() {
        assert_eq!(bounding_box(&[], 0.01), Err(GeoError::EmptyInput));
    }

    #[rstest]
    fn bounding_box_pads_single_point() {
        let bbox = bounding_box(&[Coord { x: 5.0, y: 5.0 }], 1.0).expect("one point");
        assert_eq!(bbox.min(), Coord { x: 4.0, y: 4.0 });
        assert_eq!(bbox.max(), Coord { x: 6.0, y: 6.0 });
    }

    fn coordinate() -> impl Strategy<Value = Coord<f64>> {
        (-179.0_f64..179.0, -80.0_f64..80.0).prop_map(|(x, y)| Coord { x, y })
    }

    proptest! {
        #[test]
        fn haversine_is_symmetric(a in coordinate(), b in coordinate()) {
            let forward = haversine_distance(a, b);
            let backward = haversine_distance(b, a);
            prop_assert!((forward - backward).abs() < 1e-6);
            prop_assert!(forward >= 0.0);
        }

        #[test]
        fn haversine_of_identical_points_is_zero(a in coordinate()) {
            prop_assert!(haversine_distance(a, a).abs() < 1e-9);
        }

        #[test]
        fn bounding_box_contains_every_point(
            points in prop::collection::vec(coordinate(), 1..16),
            padding in 0.0_f64..1.0,
        ) {
            let bbox = bounding_box(&points, padding).expect("non-empty input");
            for point in &points {
                prop_assert!(point.x >= bbox.min().x && point.x <= bbox.max().x);
                prop_assert!(point.y >= bbox.min().y && point.y <= bbox.max().y);
            }
        }
    }
}
