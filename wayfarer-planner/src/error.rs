//! Errors raised while planning.

use thiserror::Error;
use wayfarer_core::CollaboratorError;
use wayfarer_scorer::RankError;

/// Errors returned by [`crate::RoutePlanner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No usable candidate route was available to rank.
    #[error("no usable candidate routes")]
    NoCandidates,
    /// The path source could not produce candidates.
    #[error("path source failed: {0}")]
    PathSource(#[from] CollaboratorError),
    /// The request itself cannot be planned.
    #[error("invalid plan request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },
}

impl From<RankError> for PlanError {
    fn from(error: RankError) -> Self {
        match error {
            RankError::NoCandidates => Self::NoCandidates,
        }
    }
}
