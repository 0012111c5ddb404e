//! Traffic snapshots and the discrete events derived from them.
//!
//! A [`TrafficSnapshot`] is what a traffic collaborator reports for a region:
//! an overall congestion rate, road-level status codes, and any incidents the
//! provider classified itself. Monitoring turns snapshots into
//! [`TrafficEvent`] values keyed by identifier.

use std::time::SystemTime;

use geo::Coord;

/// Road status code for free-flowing traffic.
pub const STATUS_SMOOTH: u8 = 1;
/// Road status code for slow traffic.
pub const STATUS_SLOW: u8 = 2;
/// Road status code for congested traffic.
pub const STATUS_CONGESTED: u8 = 3;
/// Road status code for severely congested traffic.
pub const STATUS_SEVERE: u8 = 4;

/// What kind of hazard an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    /// Slow or stationary traffic.
    Congestion,
    /// A collision or breakdown.
    Accident,
    /// Road works.
    Construction,
    /// Closures and police control.
    Control,
    /// Anything the provider could not classify.
    Other,
}

impl EventKind {
    /// Human-readable label used in alert text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Congestion => "congestion",
            Self::Accident => "accident",
            Self::Construction => "roadworks",
            Self::Control => "traffic control",
            Self::Other => "incident",
        }
    }
}

/// How disruptive an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    /// Little effect on journey time.
    Minor,
    /// Noticeable delay.
    Moderate,
    /// Significant delay; worth rerouting around.
    Severe,
}

impl Severity {
    /// Severity of a provider's free-text classification.
    ///
    /// Only the exact (case-insensitive) words "severe" and "moderate" are
    /// recognised; everything else is minor.
    #[must_use]
    pub fn from_classification(classification: &str) -> Self {
        match classification.trim().to_lowercase().as_str() {
            "severe" => Self::Severe,
            "moderate" => Self::Moderate,
            _ => Self::Minor,
        }
    }

    /// Severity of a road congestion status code.
    #[must_use]
    pub const fn from_status_code(status: u8) -> Self {
        match status {
            STATUS_SEVERE.. => Self::Severe,
            STATUS_CONGESTED => Self::Moderate,
            _ => Self::Minor,
        }
    }
}

/// Congestion status for one named road in a snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadCondition {
    /// Road name as reported by the provider.
    pub name: String,
    /// Status code: 1 smooth, 2 slow, 3 congested, 4 severely congested.
    pub status: u8,
    /// Representative position on the road.
    pub location: Coord<f64>,
}

impl RoadCondition {
    /// Report whether the status code is congested or worse.
    #[must_use]
    pub const fn is_congested(&self) -> bool {
        self.status >= STATUS_CONGESTED
    }
}

/// An incident the provider reported with its own classification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportedIncident {
    /// Provider identifier; assumed stable across snapshots.
    pub id: String,
    /// Kind of incident.
    pub kind: EventKind,
    /// Provider classification, e.g. "severe".
    pub classification: String,
    /// Incident position.
    pub location: Coord<f64>,
    /// Affected road.
    pub road_name: String,
    /// Provider delay estimate in minutes.
    pub delay_minutes: u32,
}

/// A traffic report for one bounding region.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficSnapshot {
    /// Share of congested road length in the region, `0.0..=100.0`.
    pub overall_congestion_rate: f64,
    /// Road-level congestion status.
    #[cfg_attr(feature = "serde", serde(default))]
    pub roads: Vec<RoadCondition>,
    /// Incidents reported by the provider.
    #[cfg_attr(feature = "serde", serde(default))]
    pub incidents: Vec<ReportedIncident>,
}

/// A discrete hazard or congestion occurrence.
///
/// Created when first observed in a poll, refreshed while later polls keep
/// reporting it, and dropped from the active set once a poll omits it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficEvent {
    /// Identifier used for deduplication across polls.
    pub id: String,
    /// Kind of hazard.
    pub kind: EventKind,
    /// How disruptive it is.
    pub severity: Severity,
    /// Where it is.
    pub location: Coord<f64>,
    /// Affected road.
    pub road_name: String,
    /// Expected delay in minutes.
    pub delay_minutes: u32,
    /// When the event was first observed.
    pub first_seen_at: SystemTime,
}

impl TrafficEvent {
    /// Report whether the location is usable for proximity checks.
    #[must_use]
    pub fn has_finite_location(&self) -> bool {
        self.location.x.is_finite() && self.location.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Severity::Minor)]
    #[case(STATUS_SLOW, Severity::Minor)]
    #[case(STATUS_CONGESTED, Severity::Moderate)]
    #[case(STATUS_SEVERE, Severity::Severe)]
    #[case(9, Severity::Severe)]
    fn status_codes_map_to_severity(#[case] status: u8, #[case] expected: Severity) {
        assert_eq!(Severity::from_status_code(status), expected);
    }

    #[rstest]
    #[case("Severe", Severity::Severe)]
    #[case("moderate", Severity::Moderate)]
    #[case("light", Severity::Minor)]
    #[case("", Severity::Minor)]
    fn classifications_map_to_severity(#[case] raw: &str, #[case] expected: Severity) {
        assert_eq!(Severity::from_classification(raw), expected);
    }

    #[rstest]
    fn congested_threshold_is_status_three() {
        let road = |status| RoadCondition {
            name: "A1".into(),
            status,
            location: Coord { x: 0.0, y: 0.0 },
        };
        assert!(!road(STATUS_SLOW).is_congested());
        assert!(road(STATUS_CONGESTED).is_congested());
        assert!(road(STATUS_SEVERE).is_congested());
    }
}
