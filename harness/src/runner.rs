//! Harness runner: drives a world through the search and packages the result.
//!
//! # Pipeline
//!
//! ```text
//! world.initial_world() + weights() + catalog()
//!   → RunParameters::to_policy() → schedule()
//!   → ScheduleLogV1 → ReportV1 (text + JSON + digest)
//! ```
//!
//! The runner does not score or search itself; it delegates to
//! `mercator_search`.

use mercator_kernel::proof::fingerprint::world_fingerprint;
use mercator_kernel::proof::hash::ContentHash;
use mercator_kernel::state::world::WorldState;
use mercator_search::contract::{SearchBudget, Unbounded};
use mercator_search::error::SearchError;
use mercator_search::policy::SchedulerPolicyV1;
use mercator_search::search::{schedule, ScheduleResult};

use crate::config::RunParameters;
use crate::contract::{EconomyWorldV1, WorldHarnessError};
use crate::report::{build_report, ReportV1};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// World construction failed.
    WorldError(WorldHarnessError),
    /// The search aborted.
    SearchError(SearchError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorldError(e) => write!(f, "world error: {e}"),
            Self::SearchError(e) => write!(f, "search error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WorldError(e) => Some(e),
            Self::SearchError(e) => Some(e),
        }
    }
}

impl From<WorldHarnessError> for RunError {
    fn from(e: WorldHarnessError) -> Self {
        Self::WorldError(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::SearchError(e)
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcomeV1 {
    pub world_id: String,
    pub parameters: RunParameters,
    pub policy: SchedulerPolicyV1,
    pub initial_world: WorldState,
    pub initial_world_fingerprint: ContentHash,
    pub result: ScheduleResult,
}

impl RunOutcomeV1 {
    /// The report for this run's schedules.
    #[must_use]
    pub fn report(&self) -> ReportV1 {
        build_report(&self.result.to_log())
    }

    /// Run summary: world, parameters, policy and search counters.
    #[must_use]
    pub fn summary_json(&self) -> serde_json::Value {
        serde_json::json!({
            "world_id": self.world_id,
            "initial_world_fingerprint": self.initial_world_fingerprint.as_str(),
            "parameters": self.parameters.to_json_value(),
            "policy": self.policy.to_json_value(),
            "stats": self.result.stats.to_json_value(),
            "schedules_reported": self.result.schedules.len(),
        })
    }
}

/// Run `world` with `params` and no search budget.
///
/// # Errors
///
/// Returns [`RunError`] if the world's catalog is invalid or the search
/// aborts (unknown focal agent, invalid policy).
pub fn run(world: &dyn EconomyWorldV1, params: &RunParameters) -> Result<RunOutcomeV1, RunError> {
    run_with_budget(world, params, &Unbounded)
}

/// Run `world` with `params`, stopping early when `budget` declines.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_budget(
    world: &dyn EconomyWorldV1,
    params: &RunParameters,
    budget: &dyn SearchBudget,
) -> Result<RunOutcomeV1, RunError> {
    let catalog = world.catalog()?;
    let weights = world.weights();
    let initial_world = world.initial_world();
    let policy = params.to_policy();

    tracing::info!(
        world_id = world.world_id(),
        focal = %params.focal_agent,
        agents = initial_world.len(),
        templates = catalog.len(),
        depth_bound = policy.depth_bound,
        frontier_max_size = policy.frontier_max_size,
        "starting run"
    );

    let result = schedule(
        &initial_world,
        &params.focal_agent,
        &catalog,
        &weights,
        &policy,
        budget,
    )?;

    Ok(RunOutcomeV1 {
        world_id: world.world_id().to_string(),
        parameters: params.clone(),
        policy,
        initial_world_fingerprint: world_fingerprint(&initial_world),
        initial_world,
        result,
    })
}
