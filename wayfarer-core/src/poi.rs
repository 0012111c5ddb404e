//! Points of interest used to decorate a recommended route.

use geo::Coord;

use crate::PoiCategory;

/// A location worth stopping at along a route.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{PoiCategory, PointOfInterest};
///
/// let poi = PointOfInterest::new("p1", "Shell Ring Road", PoiCategory::Fuel, Coord { x: 1.0, y: 2.0 });
///
/// assert_eq!(poi.id, "p1");
/// assert_eq!(poi.category, PoiCategory::Fuel);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Provider-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category the POI was matched under.
    pub category: PoiCategory,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: PoiCategory,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            location,
        }
    }
}
