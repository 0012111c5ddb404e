//! Lifecycle errors for monitoring and navigation.

use thiserror::Error;
use wayfarer_planner::PlanError;

/// Errors returned by [`crate::TrafficMonitor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// The route polyline had no points.
    #[error("cannot monitor an empty route")]
    EmptyRoute,
    /// The poll interval was zero.
    #[error("poll interval must be greater than zero")]
    InvalidInterval,
    /// `start` was called while already monitoring.
    #[error("monitor is already running")]
    AlreadyMonitoring,
    /// The operation needs an active monitor.
    #[error("monitor is not running")]
    NotMonitoring,
}

/// Errors returned by [`crate::NavigationSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation needs an active navigation.
    #[error("no navigation is active")]
    NotActive,
    /// Traffic monitoring could not be started or updated.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// Replanning failed.
    #[error("replanning failed: {0}")]
    Plan(#[from] PlanError),
}
