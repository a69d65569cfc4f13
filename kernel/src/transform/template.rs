//! `TransformTemplate`: a scalable recipe converting inputs into outputs.
//!
//! A template has three resource maps:
//! - `inputs`: consumed when applied
//! - `outputs`: produced when applied (entries may be negative)
//! - `required`: gating resources (population, buildings, trained labor)
//!   that must be held but are not consumed
//!
//! A template is feasible for an agent iff the agent holds both `inputs`
//! and `required`.

use crate::state::agent::Agent;
use crate::state::bag::ResourceBag;
use crate::state::error::StateError;

/// A named, scalable resource recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTemplate {
    name: String,
    inputs: ResourceBag,
    outputs: ResourceBag,
    required: ResourceBag,
}

impl TransformTemplate {
    /// Create a template. Pass an empty bag for `required` when nothing
    /// gates the recipe.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        inputs: ResourceBag,
        outputs: ResourceBag,
        required: ResourceBag,
    ) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
            required,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inputs(&self) -> &ResourceBag {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &ResourceBag {
        &self.outputs
    }

    #[must_use]
    pub fn required(&self) -> &ResourceBag {
        &self.required
    }

    /// A new template with every quantity in `inputs`, `outputs` and
    /// `required` multiplied by `factor`. `self` is unaffected.
    ///
    /// Callers pass positive factors; the scheduler policy rejects zero.
    #[must_use]
    pub fn scale(&self, factor: u32) -> TransformTemplate {
        let k = f64::from(factor);
        TransformTemplate {
            name: self.name.clone(),
            inputs: self.inputs.scaled(k),
            outputs: self.outputs.scaled(k),
            required: self.required.scaled(k),
        }
    }

    /// Whether `agent` holds every input and every gating requirement.
    #[must_use]
    pub fn is_feasible_for(&self, agent: &Agent) -> bool {
        agent.has(&self.inputs) && agent.has(&self.required)
    }

    /// Apply this template to `agent`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InsufficientResources`] (agent unchanged) if a
    /// gating requirement or an input is not held.
    pub fn apply_to(&self, agent: &mut Agent) -> Result<(), StateError> {
        if let Some((resource, needed, held)) = agent.resources().first_shortfall(&self.required) {
            return Err(StateError::InsufficientResources {
                agent: agent.name().to_string(),
                resource: resource.to_string(),
                needed,
                held,
            });
        }
        agent.apply(&self.inputs, &self.outputs)
    }
}

impl std::fmt::Display for TransformTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<TransformTemplate name={}>", self.name)
    }
}
