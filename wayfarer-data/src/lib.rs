//! Collaborator adapters backed by external services.
//!
//! Responsibilities:
//! - Implement the `wayfarer-core` collaborator traits over HTTP.
//! - Validate provider payloads into core types at the boundary.
//!
//! Boundaries:
//! - Do not encode scoring or monitoring rules (live in the engine crates).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
