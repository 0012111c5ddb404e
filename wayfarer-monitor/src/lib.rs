//! Live traffic monitoring and navigation sessions for Wayfarer.
//!
//! [`TrafficMonitor`] polls a traffic source around a route and broadcasts
//! an [`wayfarer_core::Alert`] the first time a nearby event appears.
//! [`NavigationSession`] drives one monitor, watches the weather, and asks
//! the planner for a faster route when conditions turn bad.
//!
//! Both types spawn Tokio tasks and must be started inside a runtime.

#![forbid(unsafe_code)]

mod config;
mod error;
mod events;
mod monitor;
mod session;

pub use config::{MonitorConfig, SessionConfig};
pub use error::{MonitorError, SessionError};
pub use events::synthesize_events;
pub use monitor::TrafficMonitor;
pub use session::{NavigationSession, Notification, RerouteReason, RerouteSuggestion};
