//! Small worlds with hand-checkable search behavior.

use mercator_kernel::state::agent::Agent;
use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::TemplateCatalog;
use mercator_kernel::transform::template::TransformTemplate;
use mercator_search::policy::SchedulerPolicyV1;

/// Two countries; only Atlantis can build housing.
#[must_use]
pub fn two_agent_world() -> WorldState {
    WorldState::new([
        Agent::new(
            "Atlantis",
            ResourceBag::from([
                ("Population", 20.0),
                ("Timber", 3.0),
                ("PotentialEnergyUsable", 50.0),
            ]),
        ),
        Agent::new(
            "Carpania",
            ResourceBag::from([
                ("Population", 10.0),
                ("Food", 4.0),
                ("PotentialEnergyUsable", 30.0),
            ]),
        ),
    ])
}

/// [`two_agent_world`] with Atlantis at ten population: two housing units
/// use up its whole population.
#[must_use]
pub fn depopulating_world() -> WorldState {
    WorldState::new([
        Agent::new(
            "Atlantis",
            ResourceBag::from([
                ("Population", 10.0),
                ("Timber", 3.0),
                ("PotentialEnergyUsable", 50.0),
            ]),
        ),
        Agent::new(
            "Carpania",
            ResourceBag::from([
                ("Population", 10.0),
                ("Food", 4.0),
                ("PotentialEnergyUsable", 30.0),
            ]),
        ),
    ])
}

/// One template: five population become one housing unit.
///
/// # Panics
///
/// Never: the single template has a non-empty unique name.
#[must_use]
pub fn housing_catalog() -> TemplateCatalog {
    TemplateCatalog::new(vec![TransformTemplate::new(
        "Housing",
        ResourceBag::from([("Population", 5.0)]),
        ResourceBag::from([("Housing", 1.0)]),
        ResourceBag::new(),
    )])
    .expect("fixture catalog is valid")
}

#[must_use]
pub fn housing_weights() -> ResourceWeights {
    ResourceWeights::from([("Housing", 3.0), ("Timber", 1.0), ("Food", 2.0)])
}

/// Small policy with deltas retained.
#[must_use]
pub fn small_policy(depth_bound: u32, frontier_max_size: usize) -> SchedulerPolicyV1 {
    SchedulerPolicyV1 {
        depth_bound,
        frontier_max_size,
        num_output_schedules: 10,
        track_resource_deltas: true,
        ..SchedulerPolicyV1::default()
    }
}
