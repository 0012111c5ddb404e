//! One-shot notifications about newly detected traffic events.

use std::time::SystemTime;

use crate::{Severity, TrafficEvent};

/// A notification that a new event was detected near the monitored route.
///
/// Alerts are ephemeral: they are emitted once per qualifying event and are
/// not retained after dispatch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    /// The event that triggered the alert.
    pub event: TrafficEvent,
    /// Whether the event lies close enough to the route to matter.
    pub affects_route: bool,
    /// Advice shown to the traveller.
    pub suggestion_text: String,
    /// When the alert was raised.
    pub timestamp: SystemTime,
}

impl Alert {
    /// Build an alert for `event` with generated advice text.
    ///
    /// # Examples
    /// ```
    /// use std::time::SystemTime;
    /// use geo::Coord;
    /// use wayfarer_core::{Alert, EventKind, Severity, TrafficEvent};
    ///
    /// let event = TrafficEvent {
    ///     id: "acc-1".into(),
    ///     kind: EventKind::Accident,
    ///     severity: Severity::Severe,
    ///     location: Coord { x: 0.0, y: 0.0 },
    ///     road_name: "Ring Road".into(),
    ///     delay_minutes: 20,
    ///     first_seen_at: SystemTime::UNIX_EPOCH,
    /// };
    /// let alert = Alert::for_event(event, true, SystemTime::UNIX_EPOCH);
    /// assert!(alert.suggestion_text.contains("Ring Road"));
    /// assert!(alert.suggestion_text.contains("alternative"));
    /// ```
    #[must_use]
    pub fn for_event(event: TrafficEvent, affects_route: bool, timestamp: SystemTime) -> Self {
        let suggestion_text = suggestion_for(&event);
        Self {
            event,
            affects_route,
            suggestion_text,
            timestamp,
        }
    }

    /// Report whether the underlying event is severe.
    #[must_use]
    pub fn is_severe(&self) -> bool {
        self.event.severity == Severity::Severe
    }
}

fn suggestion_for(event: &TrafficEvent) -> String {
    let road = if event.road_name.trim().is_empty() {
        "your route"
    } else {
        event.road_name.as_str()
    };
    let delay = match event.delay_minutes {
        0 => String::new(),
        minutes => format!(", expect about {minutes} min delay"),
    };
    let advice = match event.severity {
        Severity::Severe => "; consider an alternative route",
        Severity::Moderate => "; allow extra time",
        Severity::Minor => "",
    };
    format!("{} ahead on {road}{delay}{advice}", capitalise(event.kind.label()))
}

fn capitalise(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventKind;
    use geo::Coord;
    use rstest::rstest;

    fn event(kind: EventKind, severity: Severity, road: &str, delay: u32) -> TrafficEvent {
        TrafficEvent {
            id: "e1".into(),
            kind,
            severity,
            location: Coord { x: 0.0, y: 0.0 },
            road_name: road.into(),
            delay_minutes: delay,
            first_seen_at: SystemTime::UNIX_EPOCH,
        }
    }

    #[rstest]
    #[case(
        event(EventKind::Congestion, Severity::Severe, "M25", 15),
        "Congestion ahead on M25, expect about 15 min delay; consider an alternative route"
    )]
    #[case(
        event(EventKind::Construction, Severity::Moderate, "", 0),
        "Roadworks ahead on your route; allow extra time"
    )]
    #[case(
        event(EventKind::Control, Severity::Minor, "High St", 2),
        "Traffic control ahead on High St, expect about 2 min delay"
    )]
    fn suggestion_text_reflects_event(#[case] event: TrafficEvent, #[case] expected: &str) {
        let alert = Alert::for_event(event, true, SystemTime::UNIX_EPOCH);
        assert_eq!(alert.suggestion_text, expected);
    }

    #[rstest]
    fn severity_is_exposed() {
        let alert = Alert::for_event(
            event(EventKind::Accident, Severity::Severe, "A1", 10),
            true,
            SystemTime::UNIX_EPOCH,
        );
        assert!(alert.is_severe());
    }
}
