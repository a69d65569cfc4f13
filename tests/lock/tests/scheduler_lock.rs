//! Scheduler lock tests: end-to-end search on small worlds, frontier bound
//! and ledger shape across parameters, and in-process determinism.

use lock_tests::fixtures::{
    depopulating_world, housing_catalog, housing_weights, small_policy, two_agent_world,
};
use mercator_harness::worlds::economy::{catalog, default_weights, demo_world};
use mercator_search::contract::{SearchProgressV1, Unbounded};
use mercator_search::node::ActionV1;
use mercator_search::policy::{OutputOrderV1, SchedulerPolicyV1};
use mercator_search::search::{schedule, ScheduleResult, TerminationReasonV1};
use proptest::prelude::*;

fn run_fixture(policy: &SchedulerPolicyV1) -> ScheduleResult {
    schedule(
        &two_agent_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        policy,
        &Unbounded,
    )
    .expect("fixture search")
}

#[test]
fn two_agent_housing_end_to_end() {
    let result = run_fixture(&small_policy(1, 10));

    // Three housing scales, three Timber exports, one affordable Food import.
    assert_eq!(result.stats.successors_generated, 7);
    assert_eq!(result.stats.completed, 7);
    assert_eq!(result.schedules.len(), 7);

    let housing = result
        .schedules
        .iter()
        .find(|s| matches!(&s.actions[0], ActionV1::Transform { template, .. } if template == "Housing"))
        .expect("a housing schedule completes");
    let delta = &housing.deltas.as_ref().expect("deltas retained")[0];
    assert!(delta.get("Housing") > 0.0);
    assert!(delta.get("Population") < 0.0);
    assert_eq!(housing.utilities.len(), 2);
}

#[test]
fn best_completed_schedule_comes_first() {
    let result = run_fixture(&small_policy(1, 10));
    // Housing x3 leaves 5 population and 3 housing: the highest quality.
    assert_eq!(
        result.schedules[0].actions,
        vec![ActionV1::Transform {
            template: "Housing".into(),
            scale: 3
        }]
    );
    for pair in result.schedules.windows(2) {
        assert!(pair[0].final_quality >= pair[1].final_quality);
    }
}

#[test]
fn food_import_pays_energy_and_penalty() {
    let result = run_fixture(&small_policy(1, 10));
    let import = result
        .schedules
        .iter()
        .find(|s| matches!(&s.actions[0], ActionV1::Transfer { sender, .. } if sender == "Carpania"))
        .expect("food import completes");
    assert_eq!(
        import.actions[0],
        ActionV1::Transfer {
            resource: "Food".into(),
            amount: 1,
            sender: "Carpania".into(),
            receiver: "Atlantis".into(),
        }
    );
    let carpania = import.final_world.get("Carpania").unwrap();
    assert_eq!(carpania.get("Food"), 3.0);
    assert_eq!(carpania.get("PotentialEnergyUsable"), 10.0);

    // Quality 3/20 → 5/20, then the transfer penalty.
    let expected = import.utilities[0] + (5.0 / 20.0 - 3.0 / 20.0) - 10.0;
    assert!((import.utilities[1] - expected).abs() < 1e-12);
}

#[test]
fn output_truncation_respects_count() {
    let policy = SchedulerPolicyV1 {
        num_output_schedules: 2,
        ..small_policy(1, 10)
    };
    let result = run_fixture(&policy);
    assert_eq!(result.schedules.len(), 2);
    assert_eq!(result.stats.completed, 7);

    let top = run_fixture(&SchedulerPolicyV1 {
        output_order: OutputOrderV1::TopByFinalUtility,
        ..policy
    });
    assert_eq!(top.schedules.len(), 2);
    assert!(top.schedules[0].final_utility() >= top.schedules[1].final_utility());
}

#[test]
fn closure_budget_stops_after_first_completion() {
    let result = schedule(
        &two_agent_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        &small_policy(1, 10),
        &|p: &SearchProgressV1| p.completed == 0,
    )
    .unwrap();
    assert_eq!(result.schedules.len(), 1);
    assert_eq!(result.stats.termination, TerminationReasonV1::BudgetExhausted);
}

#[test]
fn demo_economy_search_is_repeatable() {
    let policy = SchedulerPolicyV1 {
        depth_bound: 2,
        frontier_max_size: 30,
        ..SchedulerPolicyV1::default()
    };
    let catalog = catalog().unwrap();
    let run = || {
        schedule(
            &demo_world(),
            "Atlantis",
            &catalog,
            &default_weights(),
            &policy,
            &Unbounded,
        )
        .unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.to_log(), b.to_log());
    assert_eq!(a.to_log().digest(), b.to_log().digest());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn frontier_bound_and_ledger_shape_hold(
        depth_bound in 0_u32..4,
        frontier_max_size in 1_usize..8,
        num_output_schedules in 0_usize..6,
    ) {
        let policy = SchedulerPolicyV1 {
            num_output_schedules,
            ..small_policy(depth_bound, frontier_max_size)
        };
        let result = run_fixture(&policy);

        prop_assert!(result.stats.frontier_high_water <= frontier_max_size + 1);
        prop_assert!(result.schedules.len() <= num_output_schedules);
        prop_assert_eq!(result.stats.termination, TerminationReasonV1::FrontierExhausted);
        let depth = usize::try_from(depth_bound).unwrap();
        for schedule in &result.schedules {
            prop_assert_eq!(schedule.actions.len(), depth);
            prop_assert_eq!(schedule.utilities.len(), depth + 1);
            prop_assert_eq!(schedule.deltas.as_ref().unwrap().len(), depth);
        }
    }

    #[test]
    fn search_never_mutates_its_input(depth_bound in 0_u32..3) {
        let world = two_agent_world();
        let before = world.clone();
        let _ = schedule(
            &world,
            "Atlantis",
            &housing_catalog(),
            &housing_weights(),
            &small_policy(depth_bound, 5),
            &Unbounded,
        )
        .unwrap();
        prop_assert_eq!(world, before);
    }
}

fn run_depopulating(output_order: OutputOrderV1) -> ScheduleResult {
    let policy = SchedulerPolicyV1 {
        num_output_schedules: 100,
        output_order,
        ..small_policy(2, 64)
    };
    schedule(
        &depopulating_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        &policy,
        &Unbounded,
    )
    .expect("search over a depopulating world")
}

fn utility_rank(utility: f64) -> f64 {
    if utility.is_nan() {
        f64::NEG_INFINITY
    } else {
        utility
    }
}

#[test]
fn search_survives_zero_focal_population() {
    let result = run_depopulating(OutputOrderV1::CompletionOrder);
    assert_eq!(result.stats.termination, TerminationReasonV1::FrontierExhausted);
    assert_eq!(result.stats.evictions, 0);
    assert_eq!(result.stats.completed as usize, result.schedules.len());

    // Housing x2 leaves Atlantis without population. The transform ledger
    // step stays finite; every transfer after it scores −∞ − (−∞).
    let baseline = 3.0 / 10.0;
    let emptied: Vec<_> = result
        .schedules
        .iter()
        .filter(|s| {
            s.actions[0]
                == ActionV1::Transform {
                    template: "Housing".into(),
                    scale: 2,
                }
        })
        .collect();
    assert!(!emptied.is_empty());
    for schedule in &emptied {
        assert_eq!(schedule.final_world.get("Atlantis").unwrap().get("Population"), 0.0);
        assert_eq!(schedule.final_quality, f64::NEG_INFINITY);
        assert_eq!(schedule.utilities[0], baseline);
        assert_eq!(schedule.utilities[1], baseline + 6.0);
        assert!(schedule.actions[1].is_transfer());
        assert!(schedule.utilities[2].is_nan());
    }

    for schedule in &result.schedules {
        for utility in schedule.utilities.iter().filter(|u| u.is_nan()) {
            assert_eq!(utility.to_bits(), f64::NAN.to_bits());
        }
    }

    // Viable nodes always outrank depopulated ones, so once a depopulated
    // schedule completes every later one is depopulated too.
    let first_dead = result
        .schedules
        .iter()
        .position(|s| s.final_quality == f64::NEG_INFINITY)
        .expect("some schedule depopulates Atlantis");
    assert!(first_dead > 0);
    assert!(result.schedules[first_dead..]
        .iter()
        .all(|s| s.final_quality == f64::NEG_INFINITY));
}

#[test]
fn top_by_utility_ranks_nan_ledgers_last() {
    let completion = run_depopulating(OutputOrderV1::CompletionOrder);
    let top = run_depopulating(OutputOrderV1::TopByFinalUtility);
    assert_eq!(top.schedules.len(), completion.schedules.len());
    assert!(top.schedules.iter().any(|s| s.final_utility().is_nan()));

    for pair in top.schedules.windows(2) {
        let (a, b) = (
            utility_rank(pair[0].final_utility()),
            utility_rank(pair[1].final_utility()),
        );
        assert!(a.total_cmp(&b).is_ge(), "{a} ranked above {b}");
    }
    let first_nan = top
        .schedules
        .iter()
        .position(|s| s.final_utility().is_nan())
        .unwrap();
    assert!(top.schedules[..first_nan]
        .iter()
        .all(|s| s.final_utility().is_finite()));
}

#[test]
fn depopulating_search_is_repeatable() {
    let a = run_depopulating(OutputOrderV1::CompletionOrder);
    let b = run_depopulating(OutputOrderV1::CompletionOrder);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.to_log().digest(), b.to_log().digest());
    assert_eq!(a.to_log().to_json_bytes(), b.to_log().to_json_bytes());
}
