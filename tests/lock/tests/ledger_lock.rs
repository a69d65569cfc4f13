//! Utility ledger lock tests on the built-in economy.
//!
//! Each ledger step adds the step's score to the previous entry. A transform
//! scores `Σ weight(r)·delta(r)` over the focal delta. A transfer scores the
//! change in focal per-capita quality minus the transfer penalty. The two
//! are on different scales, so the ledger does not telescope to the final
//! quality.

use mercator_harness::config::RunParameters;
use mercator_harness::runner::run;
use mercator_harness::worlds::economy::{default_weights, DemoEconomy};
use mercator_kernel::state::bag::ResourceBag;
use mercator_search::scorer::quality;

fn demo_params() -> RunParameters {
    RunParameters {
        depth_bound: 3,
        frontier_max_size: 40,
        num_output_schedules: 20,
        track_resource_deltas: true,
        ..RunParameters::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn each_ledger_step_is_the_step_score() {
    let params = demo_params();
    let outcome = run(&DemoEconomy, &params).unwrap();
    let weights = default_weights();
    let penalty = outcome.policy.transfer_penalty;
    let initial = outcome.initial_world.get(&params.focal_agent).unwrap().resources().clone();
    assert!(!outcome.result.schedules.is_empty());

    let mut transforms = 0;
    for schedule in &outcome.result.schedules {
        if schedule.utilities.iter().any(|u| !u.is_finite()) {
            continue;
        }
        let mut holdings = initial.clone();
        for (j, action) in schedule.actions.iter().enumerate() {
            let delta = &schedule.step_deltas[j];
            let mut next: ResourceBag = holdings.clone();
            for (resource, change) in delta.iter() {
                next.add(resource, change);
            }
            let expected = if action.is_transfer() {
                quality(&next, &weights) - quality(&holdings, &weights) - penalty
            } else {
                transforms += 1;
                delta.iter().map(|(r, d)| weights.get(r) * d).sum()
            };
            let step = schedule.utilities[j + 1] - schedule.utilities[j];
            assert!(
                close(step, expected),
                "schedule {} step {j} ({action}): ledger step {step}, expected {expected}",
                schedule.completion_index
            );
            holdings = next;
        }
    }
    assert!(transforms > 0);
}

#[test]
fn baseline_is_initial_focal_quality() {
    let params = demo_params();
    let outcome = run(&DemoEconomy, &params).unwrap();
    let focal = outcome.initial_world.get(&params.focal_agent).unwrap();
    let baseline = quality(focal.resources(), &default_weights());
    for schedule in &outcome.result.schedules {
        assert_eq!(schedule.utilities[0], baseline);
    }
}

#[test]
fn final_quality_matches_final_world() {
    let params = demo_params();
    let outcome = run(&DemoEconomy, &params).unwrap();
    for schedule in &outcome.result.schedules {
        let focal = schedule.final_world.get(&params.focal_agent).unwrap();
        assert_eq!(
            quality(focal.resources(), &default_weights()).to_bits(),
            schedule.final_quality.to_bits()
        );
    }
}

#[test]
fn deltas_replay_to_final_focal_holdings() {
    let params = demo_params();
    let outcome = run(&DemoEconomy, &params).unwrap();
    let log = outcome.result.to_log();
    let initial = outcome.initial_world.get(&params.focal_agent).unwrap().resources().clone();

    for (record, schedule) in log.records.iter().zip(&outcome.result.schedules) {
        let trajectory = log.resource_trajectory(record.schedule_num, &initial).unwrap();
        let last = schedule.final_world.get(&params.focal_agent).unwrap();
        for (resource, series) in &trajectory {
            assert_eq!(series.len(), schedule.actions.len() + 1);
            let reached = series.last().copied().unwrap_or_default();
            assert!(
                (reached - last.get(resource)).abs() < 1e-9,
                "{resource}: trajectory ends at {reached}, world holds {}",
                last.get(resource)
            );
        }
    }
}

#[test]
fn default_run_logs_every_delta() {
    let params = RunParameters::default();
    assert!(!params.track_resource_deltas);
    let outcome = run(&DemoEconomy, &params).unwrap();
    assert!(outcome.result.schedules.iter().all(|s| s.deltas.is_none()));

    let log = outcome.result.to_log();
    assert!(!log.records.is_empty());
    for record in &log.records {
        for action in &record.actions {
            let delta = action.delta.as_ref().expect("delta logged");
            assert!(!delta.is_empty(), "{} logged an empty delta", action.action);
        }
    }

    let value: serde_json::Value = serde_json::from_slice(&log.to_json_bytes()).unwrap();
    assert!(value[0]["actions"][0]["delta"].is_object());

    let initial = outcome.initial_world.get(&params.focal_agent).unwrap().resources().clone();
    let trajectory = log.resource_trajectory(1, &initial).unwrap();
    assert!(trajectory.values().any(|series| series.first() != series.last()));
}
