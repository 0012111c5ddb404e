//! Shared test harness modules for the Wayfarer CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::plan::{
    PathSourceBuilder, PlanArgs, PlanConfig, PlanFile, config_from_layers_for_test,
    load_plan_file, run_plan_with,
};

mod helpers;
