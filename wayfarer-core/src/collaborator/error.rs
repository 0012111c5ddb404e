use thiserror::Error;

/// Errors raised by external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// No credential or endpoint was configured for the collaborator.
    #[error("{collaborator} is not configured")]
    ConfigurationMissing {
        /// Collaborator name, e.g. "traffic".
        collaborator: &'static str,
    },
    /// The call did not complete within the allowed time.
    #[error("{collaborator} did not respond within {timeout_ms} ms")]
    Timeout {
        /// Collaborator name or request URL.
        collaborator: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// The request could not be delivered.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The provider answered but reported a failure of its own.
    #[error("service error {code}: {message}")]
    Service {
        /// Provider status code.
        code: String,
        /// Provider message.
        message: String,
    },
    /// The payload did not have the expected shape.
    #[error("malformed response: {message}")]
    MalformedSnapshot {
        /// What was wrong with it.
        message: String,
    },
    /// The provider cannot plan for the requested travel mode.
    #[error("travel mode {mode} is not supported")]
    UnsupportedMode {
        /// Requested mode.
        mode: crate::TravelMode,
    },
}

impl CollaboratorError {
    /// Build a [`Self::Timeout`] for `collaborator` after waiting `limit`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use wayfarer_core::CollaboratorError;
    ///
    /// let error = CollaboratorError::timeout("traffic", Duration::from_secs(5));
    /// assert_eq!(error.to_string(), "traffic did not respond within 5000 ms");
    /// ```
    #[must_use]
    pub fn timeout(collaborator: &str, limit: std::time::Duration) -> Self {
        Self::Timeout {
            collaborator: collaborator.to_owned(),
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Report whether the failure is local to one call and worth retrying.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Network { .. } | Self::Http { .. }
        )
    }
}
