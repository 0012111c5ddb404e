//! Errors raised while ranking candidate routes.

use thiserror::Error;

/// Errors returned by [`crate::rank`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The batch contained no candidate routes.
    #[error("no candidate routes to rank")]
    NoCandidates,
}
