//! Fingerprint and digest lock tests: pinned world fingerprint, order
//! independence, search fingerprints, and separation between the log digest
//! and report digests.

use lock_tests::fixtures::{housing_catalog, housing_weights, small_policy, two_agent_world};
use mercator_kernel::proof::fingerprint::{world_bytes, world_fingerprint};
use mercator_kernel::proof::hash::{canonical_hash, HashDomain};
use mercator_kernel::state::agent::Agent;
use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::world::WorldState;
use mercator_search::contract::Unbounded;
use mercator_search::search::schedule;

/// SHA-256 of the `WORLD_STATE` prefix and the 180 canonical bytes of the
/// two-agent fixture.
const TWO_AGENT_FINGERPRINT: &str =
    "sha256:1660ede76c9cf2b18c380b1b83049ca90bb4c26046119ad15e5ebd79f0294c96";

#[test]
fn two_agent_fingerprint_is_pinned() {
    let world = two_agent_world();
    assert_eq!(world_bytes(&world).len(), 180);
    assert_eq!(world_fingerprint(&world).as_str(), TWO_AGENT_FINGERPRINT);
}

#[test]
fn construction_order_does_not_change_fingerprint() {
    let shuffled = WorldState::new([
        Agent::new(
            "Carpania",
            ResourceBag::from([
                ("PotentialEnergyUsable", 30.0),
                ("Food", 4.0),
                ("Population", 10.0),
            ]),
        ),
        Agent::new(
            "Atlantis",
            ResourceBag::from([
                ("Timber", 3.0),
                ("PotentialEnergyUsable", 50.0),
                ("Population", 20.0),
            ]),
        ),
    ]);
    assert_eq!(shuffled, two_agent_world());
    assert_eq!(world_fingerprint(&shuffled).as_str(), TWO_AGENT_FINGERPRINT);
}

#[test]
fn every_holding_is_bound() {
    let base = world_fingerprint(&two_agent_world());
    for agent in ["Atlantis", "Carpania"] {
        let mut world = two_agent_world();
        world
            .get_mut(agent)
            .unwrap()
            .apply(&ResourceBag::new(), &ResourceBag::from([("Population", 1.0)]))
            .unwrap();
        assert_ne!(world_fingerprint(&world), base, "{agent} population not bound");
    }
}

#[test]
fn completed_schedules_carry_their_world_fingerprint() {
    let result = schedule(
        &two_agent_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        &small_policy(2, 10),
        &Unbounded,
    )
    .unwrap();
    assert!(!result.schedules.is_empty());
    for completed in &result.schedules {
        assert_eq!(
            completed.final_world_fingerprint,
            world_fingerprint(&completed.final_world)
        );
        assert_ne!(completed.final_world_fingerprint.as_str(), TWO_AGENT_FINGERPRINT);
    }
}

#[test]
fn log_digest_is_not_a_report_artifact_hash() {
    let result = schedule(
        &two_agent_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        &small_policy(1, 10),
        &Unbounded,
    )
    .unwrap();
    let log = result.to_log();
    let bytes = log.to_json_bytes();
    assert_eq!(log.digest(), canonical_hash(HashDomain::ScheduleLog, &bytes));
    assert_ne!(log.digest(), canonical_hash(HashDomain::ReportArtifact, &bytes));
}
