//! Scheduler policy types.

use crate::error::SearchError;

/// Resource debited from a sender to pay for a transfer.
pub const DEFAULT_ENERGY_RESOURCE: &str = "PotentialEnergyUsable";

/// Resources that may move between agents by default.
///
/// Positive-weight goods only: waste, population, land and buildings stay
/// where they are, and energy is the transfer currency rather than cargo.
pub const DEFAULT_TRANSFERABLE_RESOURCES: &[&str] = &[
    "Electronics",
    "Food",
    "MetallicAlloys",
    "MetallicElements",
    "Timber",
    "Water",
];

/// Search budgets, successor-generation knobs and output shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerPolicyV1 {
    /// Number of actions after which a schedule is complete.
    pub depth_bound: u32,
    /// Frontier capacity; overflow evicts the lowest-priority entry.
    pub frontier_max_size: usize,
    /// Maximum number of completed schedules reported.
    pub num_output_schedules: usize,
    /// Retain per-step focal resource deltas in completed schedules.
    pub track_resource_deltas: bool,
    /// Which completed schedules survive truncation.
    pub output_order: OutputOrderV1,
    /// Scale factors tried for every template.
    pub scale_factors: Vec<u32>,
    /// Largest integer amount moved by a single transfer branch.
    pub max_transfer_amount: u32,
    /// Energy charged per unit of `weight × amount` transferred.
    pub transfer_cost_factor: f64,
    /// Subtracted from a transfer's delta score in the utility ledger.
    pub transfer_penalty: f64,
    /// Resource debited from the sender to pay for a transfer.
    pub energy_resource: String,
    /// Resources eligible for transfer, in enumeration order.
    pub transferable_resources: Vec<String>,
}

impl SchedulerPolicyV1 {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the frontier capacity is
    /// zero, a scale factor is zero, or a transfer cost parameter is not a
    /// finite number.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.frontier_max_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "frontier_max_size must be at least 1".into(),
            });
        }
        if self.scale_factors.contains(&0) {
            return Err(SearchError::InvalidPolicy {
                detail: "scale factors must be positive".into(),
            });
        }
        if !self.transfer_cost_factor.is_finite() || !self.transfer_penalty.is_finite() {
            return Err(SearchError::InvalidPolicy {
                detail: "transfer cost factor and penalty must be finite".into(),
            });
        }
        Ok(())
    }

    /// JSON echo of the policy for reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "depth_bound": self.depth_bound,
            "frontier_max_size": self.frontier_max_size,
            "num_output_schedules": self.num_output_schedules,
            "track_resource_deltas": self.track_resource_deltas,
            "output_order": self.output_order.as_str(),
            "scale_factors": self.scale_factors,
            "max_transfer_amount": self.max_transfer_amount,
            "transfer_cost_factor": self.transfer_cost_factor,
            "transfer_penalty": self.transfer_penalty,
            "energy_resource": self.energy_resource,
            "transferable_resources": self.transferable_resources,
        })
    }
}

impl Default for SchedulerPolicyV1 {
    fn default() -> Self {
        Self {
            depth_bound: 5,
            frontier_max_size: 100,
            num_output_schedules: 5,
            track_resource_deltas: false,
            output_order: OutputOrderV1::CompletionOrder,
            scale_factors: vec![1, 2, 3],
            max_transfer_amount: 3,
            transfer_cost_factor: 10.0,
            transfer_penalty: 10.0,
            energy_resource: DEFAULT_ENERGY_RESOURCE.to_string(),
            transferable_resources: DEFAULT_TRANSFERABLE_RESOURCES
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
        }
    }
}

/// Which completed schedules are reported when more than
/// `num_output_schedules` complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOrderV1 {
    /// The first N schedules to complete, in completion order. A
    /// higher-utility schedule that completes later may be excluded.
    CompletionOrder,
    /// The N schedules with the highest final utility, best first. Ties keep
    /// completion order.
    TopByFinalUtility,
}

impl OutputOrderV1 {
    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompletionOrder => "completion_order",
            Self::TopByFinalUtility => "top_by_final_utility",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completion_order" => Some(Self::CompletionOrder),
            "top_by_final_utility" => Some(Self::TopByFinalUtility),
            _ => None,
        }
    }
}
