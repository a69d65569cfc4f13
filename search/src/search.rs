//! Search entry point and expansion loop.

use mercator_kernel::proof::fingerprint::world_fingerprint;
use mercator_kernel::proof::hash::ContentHash;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::TemplateCatalog;
use tracing::{debug, info, trace};

use crate::contract::{SearchBudget, SearchProgressV1};
use crate::error::SearchError;
use crate::frontier::BoundedFrontier;
use crate::log::ScheduleLogV1;
use crate::node::{ActionV1, ScheduleNode};
use crate::policy::{OutputOrderV1, SchedulerPolicyV1};
use crate::scorer::quality;
use crate::successor::{generate_successors, ResourceDelta};

/// A schedule whose depth reached the depth bound.
#[derive(Debug, Clone)]
pub struct CompletedScheduleV1 {
    /// Exactly `depth_bound` actions.
    pub actions: Vec<ActionV1>,
    /// Utility ledger; `utilities.len() == actions.len() + 1`.
    pub utilities: Vec<f64>,
    /// Per-step focal deltas, always recorded. The schedule log is built
    /// from these.
    pub step_deltas: Vec<ResourceDelta>,
    /// Copy of `step_deltas` exposed only when the policy tracks deltas.
    pub deltas: Option<Vec<ResourceDelta>>,
    /// Raw focal quality of the final world.
    pub final_quality: f64,
    pub final_world: WorldState,
    pub final_world_fingerprint: ContentHash,
    /// 0-based position among all schedules completed by the run.
    pub completion_index: usize,
}

impl CompletedScheduleV1 {
    fn from_node(node: ScheduleNode, completion_index: usize, keep_deltas: bool) -> Self {
        let final_world_fingerprint = world_fingerprint(&node.world);
        Self {
            actions: node.actions,
            utilities: node.utilities,
            deltas: keep_deltas.then(|| node.deltas.clone()),
            step_deltas: node.deltas,
            final_quality: node.priority,
            final_world: node.world,
            final_world_fingerprint,
            completion_index,
        }
    }

    /// The last utility ledger entry.
    #[must_use]
    pub fn final_utility(&self) -> f64 {
        self.utilities.last().copied().unwrap_or(f64::NEG_INFINITY)
    }
}

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Every node was completed, expanded or evicted.
    FrontierExhausted,
    /// The injected budget declined another iteration.
    BudgetExhausted,
}

impl TerminationReasonV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

/// Aggregate counters of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatsV1 {
    pub expansions: u64,
    pub successors_generated: u64,
    pub evictions: u64,
    pub frontier_high_water: usize,
    /// Schedules completed, before output truncation.
    pub completed: u64,
    pub termination: TerminationReasonV1,
}

impl SearchStatsV1 {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions,
            "successors_generated": self.successors_generated,
            "evictions": self.evictions,
            "frontier_high_water": self.frontier_high_water,
            "completed": self.completed,
            "termination": self.termination.as_str(),
        })
    }
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    /// Reported schedules, at most `num_output_schedules`, in output order.
    pub schedules: Vec<CompletedScheduleV1>,
    pub stats: SearchStatsV1,
}

impl ScheduleResult {
    /// Structured log of the reported schedules.
    #[must_use]
    pub fn to_log(&self) -> ScheduleLogV1 {
        ScheduleLogV1::from_completed(&self.schedules)
    }
}

/// Run the bounded-frontier best-first search for `focal`.
///
/// The root node holds a clone of `world`; `world` itself is never mutated.
/// Each iteration consults `budget`, pops the best node (highest raw focal
/// quality, oldest among ties), and either records it as completed (depth
/// equals `policy.depth_bound`) or expands it. Transfer successors have
/// `policy.transfer_penalty` subtracted from their delta score before it
/// enters the utility ledger. After each insertion the frontier evicts one
/// lowest-priority node if it exceeds `policy.frontier_max_size`.
///
/// The creation-order counter is local to this call, so repeated calls on
/// the same inputs return identical results.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if `policy` fails validation.
/// - [`SearchError::State`] with `UnknownAgent` if `focal` is absent.
/// - [`SearchError::State`] with `InsufficientResources` if a pre-checked
///   branch fails to apply.
pub fn schedule(
    world: &WorldState,
    focal: &str,
    catalog: &TemplateCatalog,
    weights: &ResourceWeights,
    policy: &SchedulerPolicyV1,
    budget: &dyn SearchBudget,
) -> Result<ScheduleResult, SearchError> {
    policy.validate()?;
    let baseline = quality(world.get(focal)?.resources(), weights);

    let mut next_creation_order: u64 = 0;
    let mut frontier = BoundedFrontier::new(policy.frontier_max_size);
    let _ = frontier.push(ScheduleNode::root(world.clone(), baseline, next_creation_order));
    next_creation_order += 1;

    let mut completed: Vec<CompletedScheduleV1> = Vec::new();
    let mut expansions: u64 = 0;
    let mut successors_generated: u64 = 0;

    let termination = loop {
        if frontier.is_empty() {
            break TerminationReasonV1::FrontierExhausted;
        }
        let progress = SearchProgressV1 {
            expansions,
            completed: completed.len() as u64,
            frontier_len: frontier.len(),
        };
        if !budget.should_continue(&progress) {
            break TerminationReasonV1::BudgetExhausted;
        }
        let Some(node) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };

        if node.depth >= policy.depth_bound {
            let index = completed.len();
            completed.push(CompletedScheduleV1::from_node(
                node,
                index,
                policy.track_resource_deltas,
            ));
            continue;
        }

        expansions += 1;
        let successors = generate_successors(&node.world, focal, catalog, weights, policy)?;
        successors_generated += successors.len() as u64;

        for successor in successors {
            let penalty = if successor.action.is_transfer() {
                policy.transfer_penalty
            } else {
                0.0
            };
            let penalized_score = successor.delta_score - penalty;
            let raw_quality = quality(successor.world.get(focal)?.resources(), weights);
            debug!(
                action = %successor.action,
                delta_score = successor.delta_score,
                raw_quality,
                penalized_score,
                "successor"
            );

            let child = node.child(successor, penalized_score, raw_quality, next_creation_order);
            next_creation_order += 1;
            if let Some(evicted) = frontier.push(child) {
                trace!(
                    creation_order = evicted.creation_order,
                    priority = evicted.priority,
                    depth = evicted.depth,
                    "frontier eviction"
                );
            }
        }
    };

    let stats = SearchStatsV1 {
        expansions,
        successors_generated,
        evictions: frontier.evictions(),
        frontier_high_water: frontier.high_water(),
        completed: completed.len() as u64,
        termination,
    };
    info!(
        focal,
        expansions = stats.expansions,
        successors = stats.successors_generated,
        evictions = stats.evictions,
        frontier_high_water = stats.frontier_high_water,
        completed = stats.completed,
        termination = stats.termination.as_str(),
        "search finished"
    );

    Ok(ScheduleResult {
        schedules: select_output(completed, policy),
        stats,
    })
}

/// NaN ledgers rank with −∞, below every viable schedule.
fn utility_rank(utility: f64) -> f64 {
    if utility.is_nan() {
        f64::NEG_INFINITY
    } else {
        utility
    }
}

fn select_output(
    mut completed: Vec<CompletedScheduleV1>,
    policy: &SchedulerPolicyV1,
) -> Vec<CompletedScheduleV1> {
    if policy.output_order == OutputOrderV1::TopByFinalUtility {
        // Stable: ties keep completion order.
        completed.sort_by(|a, b| {
            utility_rank(b.final_utility()).total_cmp(&utility_rank(a.final_utility()))
        });
    }
    completed.truncate(policy.num_output_schedules);
    completed
}
