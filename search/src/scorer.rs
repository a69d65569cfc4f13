//! State quality scoring.
//!
//! Quality is a per-capita weighted sum of an agent's holdings. Rewards
//! compare the quality of two states; expected utility squashes a
//! discounted reward into `(0, 1)` with the logistic function.

use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::template::TransformTemplate;

use crate::error::SearchError;

/// The resource that normalizes quality.
pub const POPULATION: &str = "Population";

/// Trait for state quality functions.
///
/// The production implementation is [`WeightedPerCapita`]; tests substitute
/// fixed functions to pin reward arithmetic.
pub trait StateScorer: Send + Sync {
    /// Scalar quality of a resource bag. May be −∞ for a non-viable state.
    fn quality(&self, resources: &ResourceBag) -> f64;
}

/// `Σ weight(r)·resources(r) / resources["Population"]`.
#[derive(Debug, Clone, Copy)]
pub struct WeightedPerCapita<'a> {
    weights: &'a ResourceWeights,
}

impl<'a> WeightedPerCapita<'a> {
    #[must_use]
    pub fn new(weights: &'a ResourceWeights) -> Self {
        Self { weights }
    }
}

impl StateScorer for WeightedPerCapita<'_> {
    fn quality(&self, resources: &ResourceBag) -> f64 {
        quality(resources, self.weights)
    }
}

/// Per-capita weighted quality of `resources`.
///
/// Sums over the listed weights (unlisted resources weigh zero). Returns
/// `f64::NEG_INFINITY` when population is zero or absent, for any weights.
#[must_use]
pub fn quality(resources: &ResourceBag, weights: &ResourceWeights) -> f64 {
    let population = resources.get(POPULATION);
    if population == 0.0 {
        return f64::NEG_INFINITY;
    }
    let score: f64 = weights
        .iter()
        .map(|(resource, weight)| weight * resources.get(resource))
        .sum();
    score / population
}

/// `quality(after) − quality(before)`.
#[must_use]
pub fn undiscounted(scorer: &dyn StateScorer, before: &ResourceBag, after: &ResourceBag) -> f64 {
    scorer.quality(after) - scorer.quality(before)
}

/// `gamma^steps × undiscounted(before, after)`.
#[must_use]
pub fn discounted(
    scorer: &dyn StateScorer,
    before: &ResourceBag,
    after: &ResourceBag,
    steps: u32,
    gamma: f64,
) -> f64 {
    gamma.powf(f64::from(steps)) * undiscounted(scorer, before, after)
}

/// `1 / (1 + e^-x)`.
#[must_use]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Expected utility of a transform schedule for `agent`, in `(0, 1)`.
///
/// Applies each `(template, target)` pair in order to an isolated copy of
/// `world`. A step whose target cannot afford the template (inputs or
/// gating requirements) is skipped and the schedule continues. The reward
/// is [`discounted`] over the full schedule length (skipped steps still
/// count) and squashed with [`logistic`].
///
/// `world` is never mutated.
///
/// # Errors
///
/// Returns [`SearchError::State`] with `UnknownAgent` if `agent` or any
/// step's target is absent.
pub fn expected_utility(
    schedule: &[(TransformTemplate, String)],
    world: &WorldState,
    agent: &str,
    weights: &ResourceWeights,
    gamma: f64,
) -> Result<f64, SearchError> {
    let scorer = WeightedPerCapita::new(weights);
    let before = world.get(agent)?.resources().clone();

    let mut projected = world.clone();
    for (template, target) in schedule {
        let target_agent = projected.get_mut(target)?;
        if !template.is_feasible_for(target_agent) {
            continue;
        }
        template.apply_to(target_agent)?;
    }

    let after = projected.get(agent)?.resources();
    // Schedules longer than u32::MAX steps are not representable in a search.
    #[allow(clippy::cast_possible_truncation)]
    let steps = schedule.len() as u32;
    Ok(logistic(discounted(&scorer, &before, after, steps, gamma)))
}
