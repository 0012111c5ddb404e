//! OSRM API response types for the Route service.
//!
//! Only the fields the path source reads are modelled; anything else in the
//! payload is ignored.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// The `code` field indicates the response status. Routes are present only
/// when it is `"Ok"`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"InvalidValue"` - A parameter had an invalid value
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Fastest route first, then any alternatives.
    pub routes: Option<Vec<OsrmRoute>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if OSRM found no route between the coordinates.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        self.code == "NoRoute"
    }
}

/// One route in a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Full-resolution geometry.
    pub geometry: LineString,
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// `GeoJSON` line geometry.
#[derive(Debug, Deserialize)]
pub struct LineString {
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Route between two waypoints.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Turn-by-turn steps.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One manoeuvre and the road travelled after it.
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Road name, possibly empty.
    #[serde(default)]
    pub name: String,
    /// The manoeuvre starting the step.
    pub maneuver: Maneuver,
    /// Intersections passed along the step.
    #[serde(default)]
    pub intersections: Vec<Intersection>,
}

impl Step {
    /// Whether any intersection on the step is toll-classed.
    #[must_use]
    pub fn is_tolled(&self) -> bool {
        self.intersections
            .iter()
            .any(|intersection| intersection.classes.iter().any(|class| class == "toll"))
    }
}

/// Manoeuvre type and direction.
#[derive(Debug, Deserialize)]
pub struct Maneuver {
    /// E.g. `"turn"`, `"depart"`, `"arrive"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// E.g. `"left"`, `"slight right"`.
    pub modifier: Option<String>,
}

/// Road classes at an intersection.
#[derive(Debug, Deserialize)]
pub struct Intersection {
    /// E.g. `"toll"`, `"motorway"`.
    #[serde(default)]
    pub classes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 1520.4,
                "duration": 181.2,
                "weight": 181.2,
                "geometry": {"type": "LineString", "coordinates": [[-0.1, 51.5], [-0.09, 51.51]]},
                "legs": [{
                    "steps": [{
                        "distance": 1520.4,
                        "duration": 181.2,
                        "name": "Strand",
                        "maneuver": {"type": "depart", "location": [-0.1, 51.5]},
                        "intersections": [{"classes": ["toll"]}]
                    }]
                }]
            }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let routes = response.routes.expect("should have routes");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].geometry.coordinates.len(), 2);
        let step = &routes[0].legs[0].steps[0];
        assert_eq!(step.maneuver.kind, "depart");
        assert!(step.maneuver.modifier.is_none());
        assert!(step.is_tolled());
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.is_no_route());
        assert!(response.routes.is_none());
    }

    #[test]
    fn missing_geometry_is_rejected() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 10.0, "duration": 2.0}]}"#;

        assert!(serde_json::from_str::<RouteResponse>(json).is_err());
    }
}
