//! Error types emitted by the Wayfarer CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfarer_core::PreferenceParseError;
use wayfarer_data::routing::ProviderBuildError;
use wayfarer_planner::PlanError;

/// Errors emitted by the Wayfarer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The routing service timeout was configured as zero seconds.
    #[error("timeout-secs must be at least one second")]
    ZeroTimeout,
    /// A configured default preference is not a known tag.
    #[error("invalid default preferences: {0}")]
    InvalidPreference(#[from] PreferenceParseError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: PlanError,
    },
    /// Constructing the routing service client failed.
    #[error("failed to build path source for {base_url:?}: {source}")]
    BuildPathSource {
        /// Routing service base URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The planner could not produce a result.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner failure.
        source: PlanError,
    },
    /// Serialising the plan result failed.
    #[error("failed to serialise plan result: {0}")]
    SerialisePlanResult(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
