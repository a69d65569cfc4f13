//! `WorldState`: every agent in the economy, keyed by name.
//!
//! # Isolation
//!
//! `WorldState` is a plain value: every `Agent` owns its `ResourceBag`, and
//! `Clone` copies the whole tree. A clone shares no storage with its source,
//! so a search branch can mutate its own copy without undo bookkeeping.
//! This is the isolation primitive the scheduler depends on.

use std::collections::BTreeMap;

use crate::state::agent::Agent;
use crate::state::bag::ResourceBag;
use crate::state::error::StateError;

/// All agents of one economy snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldState {
    agents: BTreeMap<String, Agent>,
}

impl WorldState {
    /// Build a world from agents. A later agent with a duplicate name
    /// replaces the earlier one.
    #[must_use]
    pub fn new(agents: impl IntoIterator<Item = Agent>) -> Self {
        Self {
            agents: agents
                .into_iter()
                .map(|a| (a.name().to_string(), a))
                .collect(),
        }
    }

    /// Insert or replace an agent, returning the replaced one.
    pub fn insert(&mut self, agent: Agent) -> Option<Agent> {
        self.agents.insert(agent.name().to_string(), agent)
    }

    /// Look up an agent by name.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownAgent`] if no agent has that name.
    pub fn get(&self, name: &str) -> Result<&Agent, StateError> {
        self.agents.get(name).ok_or_else(|| StateError::UnknownAgent {
            name: name.to_string(),
        })
    }

    /// Mutable lookup by name.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownAgent`] if no agent has that name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Agent, StateError> {
        self.agents
            .get_mut(name)
            .ok_or_else(|| StateError::UnknownAgent {
                name: name.to_string(),
            })
    }

    /// Agents in name order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Agent names in order.
    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    /// Number of agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the world has no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Move `items` from `sender` to `receiver`, atomically.
    ///
    /// Every item is validated against the sender's holdings before anything
    /// is mutated. Repeated resources are summed before validation, so a
    /// list that is only short in aggregate is rejected too.
    ///
    /// # Errors
    ///
    /// - [`StateError::UnknownAgent`] if either agent is absent.
    /// - [`StateError::MalformedTransfer`] for a self-transfer or a negative
    ///   or non-finite amount.
    /// - [`StateError::InsufficientResources`] if any single item is short.
    ///
    /// On error, neither agent is changed.
    pub fn transfer(
        &mut self,
        sender: &str,
        receiver: &str,
        items: &[(&str, f64)],
    ) -> Result<(), StateError> {
        // Both lookups happen before any validation so UnknownAgent wins.
        self.get(receiver)?;
        let sending = self.get(sender)?;

        if sender == receiver {
            return Err(StateError::MalformedTransfer {
                detail: format!("{sender} cannot transfer to itself"),
            });
        }

        let mut totals = ResourceBag::new();
        for &(resource, amount) in items {
            if !amount.is_finite() || amount < 0.0 {
                return Err(StateError::MalformedTransfer {
                    detail: format!("amount {amount} of {resource} is not a finite non-negative number"),
                });
            }
            totals.add(resource, amount);
        }

        if let Some((resource, needed, held)) = sending.resources().first_shortfall(&totals) {
            return Err(StateError::InsufficientResources {
                agent: sender.to_string(),
                resource: resource.to_string(),
                needed,
                held,
            });
        }

        // Validated above; from here on nothing can fail.
        let sending = self.get_mut(sender)?;
        sending.apply(&totals, &ResourceBag::new())?;
        let receiving = self.get_mut(receiver)?;
        receiving.apply(&ResourceBag::new(), &totals)?;
        Ok(())
    }
}
