//! HTTP path sources for routing services.
//!
//! This module provides [`HttpPathSource`], an implementation of
//! [`wayfarer_core::PathSource`] that fetches candidate routes from an OSRM
//! routing service.
//!
//! # Architecture
//!
//! The source makes one request to the OSRM Route API per planning call,
//! asking for the fastest route and its alternatives. Every route in the
//! payload is validated into a [`wayfarer_core::CandidateRoute`] before it
//! leaves this module, so scoring never sees raw JSON.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use wayfarer_data::routing::{HttpPathSource, HttpPathSourceConfig};
//!
//! let config = HttpPathSourceConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0")
//!     .with_alternatives(2);
//! let source = HttpPathSource::with_config(config)?;
//! assert_eq!(source.config().alternatives, 2);
//! # Ok::<(), wayfarer_data::routing::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_USER_AGENT, HttpPathSource, HttpPathSourceConfig, ProviderBuildError};
