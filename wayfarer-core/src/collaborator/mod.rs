//! Boundaries to the external providers the engine depends on.
//!
//! Path, traffic, weather and POI providers are reached through the async
//! traits in this module. Implementations validate provider payloads into the
//! strict domain types before returning them, so scoring and monitoring never
//! see untyped data. Failures are reported as [`CollaboratorError`]; callers
//! decide whether to fall back to neutral values or skip a tick.

mod error;
mod provider;
mod unconfigured;

pub use error::CollaboratorError;
pub use provider::{PathSource, PoiSource, TrafficSource, WeatherSource};
pub use unconfigured::Unconfigured;
