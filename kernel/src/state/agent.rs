//! `Agent`: a named holder of a resource bag.

use crate::state::bag::ResourceBag;
use crate::state::error::StateError;

/// A named entity owning a resource bag (a "country" in the economy worlds).
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    name: String,
    resources: ResourceBag,
}

impl Agent {
    /// Create an agent with the given starting resources.
    #[must_use]
    pub fn new(name: impl Into<String>, resources: ResourceBag) -> Self {
        Self {
            name: name.into(),
            resources,
        }
    }

    /// The agent's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the agent's holdings.
    #[must_use]
    pub fn resources(&self) -> &ResourceBag {
        &self.resources
    }

    /// Mutable access to the holdings, bypassing the feasibility guard.
    ///
    /// Used by configuration loading and tests. Planning code mutates only
    /// through [`Agent::apply`] and [`crate::state::world::WorldState::transfer`].
    pub fn resources_mut(&mut self) -> &mut ResourceBag {
        &mut self.resources
    }

    /// Quantity of `resource`, or `0.0` if absent.
    #[must_use]
    pub fn get(&self, resource: &str) -> f64 {
        self.resources.get(resource)
    }

    /// True iff the agent holds at least `required(k)` of every `k`.
    #[must_use]
    pub fn has(&self, required: &ResourceBag) -> bool {
        self.resources.covers(required)
    }

    /// Consume `inputs` and produce `outputs`, all or nothing.
    ///
    /// Each input is subtracted exactly once and each output added exactly
    /// once; keys outside `inputs ∪ outputs` are untouched. Outputs absent
    /// from the bag are created. Outputs may be negative.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InsufficientResources`] (and leaves the bag
    /// unchanged) if the agent does not hold every input.
    pub fn apply(&mut self, inputs: &ResourceBag, outputs: &ResourceBag) -> Result<(), StateError> {
        if let Some((resource, needed, held)) = self.resources.first_shortfall(inputs) {
            return Err(StateError::InsufficientResources {
                agent: self.name.clone(),
                resource: resource.to_string(),
                needed,
                held,
            });
        }
        for (resource, amount) in inputs.iter() {
            self.resources.add(resource, -amount);
        }
        for (resource, amount) in outputs.iter() {
            self.resources.add(resource, amount);
        }
        Ok(())
    }
}
