//! One-step successor generation.
//!
//! Every emitted successor owns a fresh clone of the input world with
//! exactly one action applied. The input world is never mutated.
//! Infeasible branches are dropped silently.

use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::TemplateCatalog;

use crate::error::SearchError;
use crate::node::ActionV1;
use crate::policy::SchedulerPolicyV1;
use crate::scorer::quality;

/// Per-resource change of the focal agent's holdings across one action.
/// Only resources whose quantity changed appear.
pub type ResourceDelta = ResourceBag;

/// A candidate next step from some world.
#[derive(Debug, Clone)]
pub struct SuccessorV1 {
    pub action: ActionV1,
    /// The world after `action`, owned by this successor.
    pub world: WorldState,
    /// Focal holdings after minus before.
    pub delta: ResourceDelta,
    /// Transform: `Σ weight(r)·delta(r)`. Transfer: focal quality after
    /// minus before. Unpenalized.
    pub delta_score: f64,
}

/// `after − before` for every resource that changed.
#[must_use]
pub fn resource_delta(before: &ResourceBag, after: &ResourceBag) -> ResourceDelta {
    let mut delta = ResourceDelta::new();
    for (resource, new) in after.iter() {
        let change = new - before.get(resource);
        if change != 0.0 {
            delta.set(resource, change);
        }
    }
    for (resource, old) in before.iter() {
        if !after.contains(resource) && old != 0.0 {
            delta.set(resource, -old);
        }
    }
    delta
}

/// Energy charged to move `amount` units of `resource`.
///
/// Clamped at zero: a negatively weighted resource never mints energy.
#[must_use]
pub fn transfer_cost(
    resource: &str,
    amount: u32,
    weights: &ResourceWeights,
    policy: &SchedulerPolicyV1,
) -> f64 {
    (weights.get(resource) * f64::from(amount) * policy.transfer_cost_factor).max(0.0)
}

/// All feasible one-step successors of `world` for `focal`.
///
/// Transform branches come first (catalog order, then scale factor order),
/// followed by transfer branches (other agents in name order; focal as
/// sender, then as receiver; allow-list order; ascending amount).
///
/// # Errors
///
/// Returns [`SearchError::State`] with `UnknownAgent` if `focal` is absent.
/// An `InsufficientResources` from a pre-checked branch is a contract
/// violation and is propagated rather than dropped.
pub fn generate_successors(
    world: &WorldState,
    focal: &str,
    catalog: &TemplateCatalog,
    weights: &ResourceWeights,
    policy: &SchedulerPolicyV1,
) -> Result<Vec<SuccessorV1>, SearchError> {
    let before = world.get(focal)?.resources().clone();
    let mut successors = Vec::new();
    push_transform_branches(world, focal, &before, catalog, weights, policy, &mut successors)?;
    push_transfer_branches(world, focal, &before, weights, policy, &mut successors)?;
    Ok(successors)
}

fn push_transform_branches(
    world: &WorldState,
    focal: &str,
    before: &ResourceBag,
    catalog: &TemplateCatalog,
    weights: &ResourceWeights,
    policy: &SchedulerPolicyV1,
    out: &mut Vec<SuccessorV1>,
) -> Result<(), SearchError> {
    let agent = world.get(focal)?;
    for template in catalog {
        for &factor in &policy.scale_factors {
            let scaled = template.scale(factor);
            if !scaled.is_feasible_for(agent) {
                continue;
            }
            let mut next = world.clone();
            scaled.apply_to(next.get_mut(focal)?)?;
            let delta = resource_delta(before, next.get(focal)?.resources());
            let delta_score = delta.iter().map(|(r, d)| weights.get(r) * d).sum();
            out.push(SuccessorV1 {
                action: ActionV1::Transform {
                    template: template.name().to_string(),
                    scale: factor,
                },
                world: next,
                delta,
                delta_score,
            });
        }
    }
    Ok(())
}

fn push_transfer_branches(
    world: &WorldState,
    focal: &str,
    before: &ResourceBag,
    weights: &ResourceWeights,
    policy: &SchedulerPolicyV1,
    out: &mut Vec<SuccessorV1>,
) -> Result<(), SearchError> {
    let quality_before = quality(before, weights);
    for other in world.agent_names().filter(|name| *name != focal) {
        for (sender, receiver) in [(focal, other), (other, focal)] {
            let holdings = world.get(sender)?.resources();
            for resource in &policy.transferable_resources {
                let held = holdings.get(resource);
                if held <= 0.0 {
                    continue;
                }
                // `held` is positive and finite here; the cap bounds the cast.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let max_amount = held.floor().min(f64::from(policy.max_transfer_amount)) as u32;
                for amount in 1..=max_amount {
                    let cost = transfer_cost(resource, amount, weights, policy);
                    let mut requirement = ResourceBag::new();
                    requirement.add(resource, f64::from(amount));
                    requirement.add(&policy.energy_resource, cost);
                    if !holdings.covers(&requirement) {
                        continue;
                    }

                    let mut next = world.clone();
                    next.transfer(sender, receiver, &[(resource.as_str(), f64::from(amount))])?;
                    if cost > 0.0 {
                        let energy = ResourceBag::from([(policy.energy_resource.as_str(), cost)]);
                        next.get_mut(sender)?.apply(&energy, &ResourceBag::new())?;
                    }

                    let after = next.get(focal)?.resources();
                    let delta = resource_delta(before, after);
                    let delta_score = quality(after, weights) - quality_before;
                    out.push(SuccessorV1 {
                        action: ActionV1::Transfer {
                            resource: resource.clone(),
                            amount,
                            sender: sender.to_string(),
                            receiver: receiver.to_string(),
                        },
                        world: next,
                        delta,
                        delta_score,
                    });
                }
            }
        }
    }
    Ok(())
}
