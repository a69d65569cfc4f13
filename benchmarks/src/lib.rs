//! Shared helpers for mercator benchmark suites.

use mercator_harness::contract::EconomyWorldV1;
use mercator_harness::worlds::economy::DemoEconomy;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::TemplateCatalog;
use mercator_search::contract::Unbounded;
use mercator_search::policy::{OutputOrderV1, SchedulerPolicyV1};
use mercator_search::search::{schedule, ScheduleResult};

/// Focal agent for every benchmark regime.
pub const FOCAL: &str = "Atlantis";

/// Prepared inputs for calling `schedule()` directly, bypassing the runner.
pub struct SearchSetup {
    pub world: WorldState,
    pub catalog: TemplateCatalog,
    pub weights: ResourceWeights,
}

/// Build the demo economy inputs once.
///
/// # Panics
///
/// Panics if the built-in catalog is invalid. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_search_setup() -> SearchSetup {
    let economy = DemoEconomy;
    SearchSetup {
        world: economy.initial_world(),
        catalog: economy.catalog().expect("catalog"),
        weights: economy.weights(),
    }
}

/// Run `schedule()` with prepared setup.
///
/// # Panics
///
/// Panics if the search fails.
#[must_use]
pub fn run_search_only(setup: &SearchSetup, policy: &SchedulerPolicyV1) -> ScheduleResult {
    schedule(
        &setup.world,
        FOCAL,
        &setup.catalog,
        &setup.weights,
        policy,
        &Unbounded,
    )
    .expect("schedule")
}

/// A named search configuration over the demo economy.
pub struct Regime {
    pub name: &'static str,
    pub policy: SchedulerPolicyV1,
}

/// Shallow search with a roomy frontier: no evictions.
#[must_use]
pub fn regime_shallow() -> Regime {
    Regime {
        name: "shallow",
        policy: SchedulerPolicyV1 {
            depth_bound: 2,
            frontier_max_size: 1_000,
            ..SchedulerPolicyV1::default()
        },
    }
}

/// Default run parameters.
#[must_use]
pub fn regime_default() -> Regime {
    Regime {
        name: "default",
        policy: SchedulerPolicyV1::default(),
    }
}

/// Deep search through a tiny frontier: eviction on nearly every insert.
#[must_use]
pub fn regime_frontier_pressure() -> Regime {
    Regime {
        name: "frontier_pressure",
        policy: SchedulerPolicyV1 {
            depth_bound: 6,
            frontier_max_size: 8,
            ..SchedulerPolicyV1::default()
        },
    }
}

/// Default search with deltas retained and top-by-utility output.
#[must_use]
pub fn regime_tracked_top() -> Regime {
    Regime {
        name: "tracked_top",
        policy: SchedulerPolicyV1 {
            track_resource_deltas: true,
            num_output_schedules: 20,
            output_order: OutputOrderV1::TopByFinalUtility,
            ..SchedulerPolicyV1::default()
        },
    }
}

/// Every regime, in reporting order.
#[must_use]
pub fn all_regimes() -> Vec<Regime> {
    vec![
        regime_shallow(),
        regime_default(),
        regime_frontier_pressure(),
        regime_tracked_top(),
    ]
}
