//! Test helpers for writing plan requests and stubbing the routing service.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use wayfarer_core::test_support::{StubPathSource, candidate};
use wayfarer_core::{CandidateRoute, PathSource, PreferenceSet, TravelMode};
use wayfarer_planner::PlanRequest;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory holding a request file path.
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request_path: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");
        Self {
            _tmp: tmp,
            root,
            request_path,
        }
    }

    pub(super) fn write_plan(&self, plan: &PlanFile) {
        let payload = serde_json::to_string_pretty(plan).expect("serialise plan file");
        write_utf8(&self.request_path, payload.as_bytes());
    }
}

/// A drive between two points in central London.
pub(super) fn journey(preferences: PreferenceSet) -> PlanRequest {
    PlanRequest::new(
        Coord { x: -0.12, y: 51.50 },
        Coord { x: -0.10, y: 51.52 },
        TravelMode::Drive,
    )
    .with_preferences(preferences)
}

/// A short slow route and a long quick one.
///
/// The short route wins under `shortest` and the quick one under `fastest`.
pub(super) fn contrasting_candidates() -> Vec<CandidateRoute> {
    vec![
        candidate("short", 10_000.0, 1_500),
        candidate("quick", 14_000.0, 1_000),
    ]
}

pub(super) fn args_for(path: &Utf8Path) -> PlanArgs {
    PlanArgs {
        request_path: Some(path.to_path_buf()),
        ..PlanArgs::default()
    }
}

/// Hands out a scripted path source and counts how often it was asked.
#[derive(Debug)]
pub(super) struct StubPathSourceBuilder {
    routes: Vec<CandidateRoute>,
    builds: AtomicUsize,
}

impl StubPathSourceBuilder {
    pub(super) fn new(routes: Vec<CandidateRoute>) -> Self {
        Self {
            routes,
            builds: AtomicUsize::new(0),
        }
    }

    pub(super) fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl PathSourceBuilder for StubPathSourceBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Arc<dyn PathSource>, CliError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubPathSource::with_routes(self.routes.clone())))
    }
}
