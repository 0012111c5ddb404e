//! Turning traffic snapshots into keyed events.

use std::time::SystemTime;

use wayfarer_core::traffic::STATUS_SEVERE;
use wayfarer_core::{EventKind, RoadCondition, Severity, TrafficEvent, TrafficSnapshot};

/// Estimated delay for a congested road, in minutes.
const CONGESTED_DELAY_MINUTES: u32 = 5;
/// Estimated delay for a severely congested road, in minutes.
const SEVERE_DELAY_MINUTES: u32 = 15;

/// Derive the events reported by `snapshot`.
///
/// Roads at congestion status 3 or worse become `congestion:<road>` events;
/// provider incidents pass through with their own ids. Every event is
/// stamped with `observed_at`. Events without a finite location are dropped.
///
/// # Examples
/// ```
/// use std::time::SystemTime;
/// use geo::Coord;
/// use wayfarer_core::{RoadCondition, Severity, TrafficSnapshot};
/// use wayfarer_monitor::synthesize_events;
///
/// let snapshot = TrafficSnapshot {
///     overall_congestion_rate: 12.0,
///     roads: vec![RoadCondition {
///         name: "A40".into(),
///         status: 4,
///         location: Coord { x: -0.2, y: 51.5 },
///     }],
///     incidents: Vec::new(),
/// };
/// let events = synthesize_events(&snapshot, SystemTime::UNIX_EPOCH);
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].id, "congestion:A40");
/// assert_eq!(events[0].severity, Severity::Severe);
/// ```
#[must_use]
pub fn synthesize_events(snapshot: &TrafficSnapshot, observed_at: SystemTime) -> Vec<TrafficEvent> {
    let congestion = snapshot
        .roads
        .iter()
        .filter(|road| road.is_congested())
        .map(|road| congestion_event(road, observed_at));
    let incidents = snapshot.incidents.iter().map(|incident| TrafficEvent {
        id: incident.id.clone(),
        kind: incident.kind,
        severity: Severity::from_classification(&incident.classification),
        location: incident.location,
        road_name: incident.road_name.clone(),
        delay_minutes: incident.delay_minutes,
        first_seen_at: observed_at,
    });
    congestion
        .chain(incidents)
        .filter(|event| {
            let usable = event.has_finite_location();
            if !usable {
                log::warn!("dropping traffic event {} without a usable location", event.id);
            }
            usable
        })
        .collect()
}

fn congestion_event(road: &RoadCondition, observed_at: SystemTime) -> TrafficEvent {
    let delay_minutes = if road.status >= STATUS_SEVERE {
        SEVERE_DELAY_MINUTES
    } else {
        CONGESTED_DELAY_MINUTES
    };
    TrafficEvent {
        id: format!("congestion:{}", road.name),
        kind: EventKind::Congestion,
        severity: Severity::from_status_code(road.status),
        location: road.location,
        road_name: road.name.clone(),
        delay_minutes,
        first_seen_at: observed_at,
    }
}
