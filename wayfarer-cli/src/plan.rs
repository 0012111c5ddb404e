//! Plan command implementation for the Wayfarer CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{CandidateRoute, PathSource, Preference, PreferenceSet, Unconfigured};
use wayfarer_data::routing::{HttpPathSource, HttpPathSourceConfig};
use wayfarer_fs::open_utf8_file;
use wayfarer_planner::{PlanRequest, PlanResult, PlannerConfig, RoutePlanner};

use crate::{
    ARG_PLAN_OSRM_BASE_URL, ARG_PLAN_PREFERENCES, ARG_PLAN_REQUEST, ARG_PLAN_TIMEOUT_SECS,
    CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate routes between an origin and a destination. \
                 The request is a JSON file carrying origin, destination, \
                 mode and preferences. Inline candidates are ranked offline \
                 with neutral traffic and weather signals; otherwise \
                 candidates are fetched from an OSRM instance.",
    about = "Rank candidate routes for a journey"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file describing the journey.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Seconds to wait for the routing service.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Comma-separated default preferences, overridden by the request.
    #[arg(long = ARG_PLAN_PREFERENCES, value_name = "tags")]
    #[serde(default)]
    pub(crate) preferences: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Base URL for the OSRM route service.
    pub(crate) osrm_base_url: String,
    /// Routing service timeout.
    pub(crate) timeout: Duration,
    /// Traveller defaults merged beneath the request's preferences.
    pub(crate) preferences: PreferenceSet,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match wayfarer_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let defaults = HttpPathSourceConfig::default();
        let osrm_base_url = args.osrm_base_url.unwrap_or(defaults.base_url);
        let timeout = match args.timeout_secs {
            Some(0) => return Err(CliError::ZeroTimeout),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };
        let preferences = args
            .preferences
            .as_deref()
            .map_or_else(|| Ok(PreferenceSet::new()), parse_preferences)?;

        Ok(Self {
            request_path,
            osrm_base_url,
            timeout,
            preferences,
        })
    }
}

fn parse_preferences(tags: &str) -> Result<PreferenceSet, CliError> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.parse::<Preference>().map_err(CliError::from))
        .collect()
}

/// Contents of a plan request file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct PlanFile {
    /// Endpoints, mode and per-request preferences.
    #[serde(flatten)]
    pub(crate) request: PlanRequest,
    /// Candidates to rank instead of asking the routing service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) candidates: Option<Vec<CandidateRoute>>,
}

/// Builds the path source used when a request carries no candidates.
pub(crate) trait PathSourceBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Arc<dyn PathSource>, CliError>;
}

pub(crate) struct OsrmPathSourceBuilder;

impl PathSourceBuilder for OsrmPathSourceBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Arc<dyn PathSource>, CliError> {
        let source_config =
            HttpPathSourceConfig::new(config.osrm_base_url.clone()).with_timeout(config.timeout);
        let source = HttpPathSource::with_config(source_config).map_err(|source| {
            CliError::BuildPathSource {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        Ok(Arc::new(source))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &OsrmPathSourceBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PathSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let result = execute_plan(args, builder)?;
    write_plan_result(writer, &result)
}

fn execute_plan(args: PlanArgs, builder: &dyn PathSourceBuilder) -> Result<PlanResult, CliError> {
    let config = resolve_plan_config(args)?;
    let PlanFile {
        request,
        candidates,
    } = load_plan_file(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let preferences = PreferenceSet::merged(&config.preferences, &request.preferences);
    let request = request.with_preferences(preferences);
    let planner_config = PlannerConfig::default().with_collaborator_timeout(config.timeout);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let outcome = if let Some(candidates) = candidates {
        log::debug!("ranking {} inline candidates offline", candidates.len());
        let planner = RoutePlanner::with_config(
            Unconfigured,
            Unconfigured,
            Unconfigured,
            Unconfigured,
            planner_config,
        );
        runtime.block_on(planner.plan_with_candidates(&request, candidates))
    } else {
        log::debug!("fetching candidates from {}", config.osrm_base_url);
        let paths = builder.build(&config)?;
        let planner = RoutePlanner::with_config(
            paths,
            Unconfigured,
            Unconfigured,
            Unconfigured,
            planner_config,
        );
        runtime.block_on(planner.plan(&request))
    };
    outcome.map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanFile`] from disk.
pub(crate) fn load_plan_file(path: &Utf8Path) -> Result<PlanFile, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_result(writer: &mut dyn Write, result: &PlanResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(result).map_err(CliError::SerialisePlanResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
