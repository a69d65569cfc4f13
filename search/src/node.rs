//! Schedule nodes, action descriptors and the frontier ordering key.

use std::cmp::Ordering;

use mercator_kernel::state::world::WorldState;

use crate::successor::{ResourceDelta, SuccessorV1};

/// One step of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionV1 {
    /// Apply `template` scaled by `scale` to the focal agent.
    Transform { template: String, scale: u32 },
    /// Move `amount` units of `resource` from `sender` to `receiver`.
    Transfer {
        resource: String,
        amount: u32,
        sender: String,
        receiver: String,
    },
}

impl ActionV1 {
    #[must_use]
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }
}

impl std::fmt::Display for ActionV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transform { template, scale } => write!(f, "TRANSFORM {template} x{scale}"),
            Self::Transfer {
                resource,
                amount,
                sender,
                receiver,
            } => write!(f, "TRANSFER {resource} x{amount} {sender} -> {receiver}"),
        }
    }
}

/// A partial schedule in the frontier.
///
/// Each node owns its `WorldState` snapshot; no two nodes share one.
///
/// Two scores are kept apart on purpose:
/// - `priority` is the raw (unpenalized) focal quality of `world`, used only
///   for frontier ordering.
/// - `utilities` is the reported ledger: `utilities[0]` is the baseline
///   quality and each later entry adds the step's penalized delta score.
#[derive(Debug, Clone)]
pub struct ScheduleNode {
    /// Actions taken so far, in order.
    pub actions: Vec<ActionV1>,
    /// World reached after `actions`.
    pub world: WorldState,
    /// Running utility ledger; `utilities.len() == depth + 1`.
    pub utilities: Vec<f64>,
    /// Focal resource delta per step; `deltas.len() == depth`.
    pub deltas: Vec<ResourceDelta>,
    /// Number of actions (root = 0).
    pub depth: u32,
    /// Raw focal quality of `world` (frontier priority).
    pub priority: f64,
    /// Per-search insertion sequence number for FIFO tie-breaking.
    pub creation_order: u64,
}

impl ScheduleNode {
    /// The root node: no actions, the initial world, ledger `[baseline]`.
    #[must_use]
    pub fn root(world: WorldState, baseline_quality: f64, creation_order: u64) -> Self {
        Self {
            actions: Vec::new(),
            world,
            utilities: vec![baseline_quality],
            deltas: Vec::new(),
            depth: 0,
            priority: baseline_quality,
            creation_order,
        }
    }

    /// Build the child reached by `successor`.
    ///
    /// `penalized_score` extends the utility ledger; `raw_quality` becomes
    /// the child's frontier priority. A NaN ledger entry (a step between two
    /// non-viable states) is stored as the canonical [`f64::NAN`], so its
    /// bits do not depend on the platform.
    #[must_use]
    pub fn child(
        &self,
        successor: SuccessorV1,
        penalized_score: f64,
        raw_quality: f64,
        creation_order: u64,
    ) -> Self {
        let mut actions = self.actions.clone();
        actions.push(successor.action);
        let mut utilities = self.utilities.clone();
        let next = self.last_utility() + penalized_score;
        utilities.push(if next.is_nan() { f64::NAN } else { next });
        let mut deltas = self.deltas.clone();
        deltas.push(successor.delta);
        Self {
            actions,
            world: successor.world,
            utilities,
            deltas,
            depth: self.depth + 1,
            priority: raw_quality,
            creation_order,
        }
    }

    /// The last ledger entry.
    #[must_use]
    pub fn last_utility(&self) -> f64 {
        self.utilities.last().copied().unwrap_or(f64::NEG_INFINITY)
    }
}

/// The frontier ordering key: `(priority descending, creation_order ascending)`.
///
/// Smaller keys are better. Priorities compare with [`f64::total_cmp`], so
/// −∞ (a non-viable state) orders below every finite quality without special
/// casing, and the order is total even for NaN.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub priority: f64,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&ScheduleNode> for FrontierKey {
    fn from(node: &ScheduleNode) -> Self {
        Self {
            priority: node.priority,
            creation_order: node.creation_order,
        }
    }
}
