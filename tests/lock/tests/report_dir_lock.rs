//! Report directory lock tests: produce a report from the built-in economy,
//! write it, read it back, and fail closed on tampering. Reports whose
//! ledgers hold NaN survive the same roundtrip.

use lock_tests::fixtures::{depopulating_world, housing_catalog, housing_weights, small_policy};
use mercator_harness::config::RunParameters;
use mercator_harness::report::{
    build_report, render_text, ReportV1, DIGEST_FILENAME, SCHEDULES_FILENAME,
    SCHEDULE_LOG_FILENAME,
};
use mercator_harness::report_dir::{
    read_report_dir, verify_report_dir, write_report_dir, ReportDirReadError,
};
use mercator_harness::runner::run;
use mercator_harness::worlds::economy::DemoEconomy;
use mercator_search::contract::Unbounded;
use mercator_search::policy::SchedulerPolicyV1;
use mercator_search::search::schedule;

fn demo_report(depth_bound: u32) -> ReportV1 {
    let params = RunParameters {
        depth_bound,
        frontier_max_size: 30,
        ..RunParameters::default()
    };
    run(&DemoEconomy, &params).unwrap().report()
}

fn written(report: &ReportV1) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(report, dir.path()).unwrap();
    dir
}

#[test]
fn roundtrip_preserves_report() {
    for depth in [1, 2] {
        let report = demo_report(depth);
        let dir = written(&report);
        let loaded = read_report_dir(dir.path()).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(verify_report_dir(dir.path()).unwrap(), report.digest);
    }
}

#[test]
fn deltas_survive_the_roundtrip() {
    let report = demo_report(2);
    let dir = written(&report);
    let loaded = read_report_dir(dir.path()).unwrap();
    for record in &loaded.log.records {
        for action in &record.actions {
            assert!(action.delta.is_some(), "{} lost its delta", action.action);
        }
    }
}

#[test]
fn text_listing_is_the_rendered_log() {
    let report = demo_report(2);
    let dir = written(&report);
    let text = std::fs::read_to_string(dir.path().join(SCHEDULES_FILENAME)).unwrap();
    assert_eq!(text, render_text(&report.log));
    assert!(text.starts_with("Schedule 1 (Final EU: "));
}

#[test]
fn digest_ignores_directory_location() {
    let report = demo_report(2);
    let a = written(&report);
    let b = written(&report);
    assert_eq!(
        verify_report_dir(a.path()).unwrap(),
        verify_report_dir(b.path()).unwrap()
    );
}

#[test]
fn fail_closed_missing_log() {
    let dir = written(&demo_report(2));
    std::fs::remove_file(dir.path().join(SCHEDULE_LOG_FILENAME)).unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(
        matches!(&err, ReportDirReadError::MissingFile { filename } if filename == SCHEDULE_LOG_FILENAME),
        "got {err}"
    );
}

#[test]
fn fail_closed_tampered_text() {
    let dir = written(&demo_report(2));
    let path = dir.path().join(SCHEDULES_FILENAME);
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replacen("Schedule 1", "Schedule 9", 1)).unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirReadError::DigestMismatch { .. }), "got {err}");
}

#[test]
fn fail_closed_replaced_digest() {
    let dir = written(&demo_report(2));
    let other = demo_report(1);
    std::fs::write(dir.path().join(DIGEST_FILENAME), other.digest.as_str()).unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirReadError::DigestMismatch { .. }), "got {err}");
}

#[test]
fn fail_closed_extra_file() {
    let dir = written(&demo_report(2));
    std::fs::write(dir.path().join("notes.md"), b"hand edits").unwrap();
    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirReadError::ExtraFile { .. }), "got {err}");
}

#[test]
fn rewrite_replaces_previous_report() {
    let first = demo_report(2);
    let second = demo_report(1);
    let dir = written(&first);
    write_report_dir(&second, dir.path()).unwrap();
    assert_eq!(read_report_dir(dir.path()).unwrap(), second);
}

#[test]
fn non_finite_ledgers_roundtrip() {
    let policy = SchedulerPolicyV1 {
        num_output_schedules: 100,
        ..small_policy(2, 64)
    };
    let result = schedule(
        &depopulating_world(),
        "Atlantis",
        &housing_catalog(),
        &housing_weights(),
        &policy,
        &Unbounded,
    )
    .unwrap();
    let report = build_report(&result.to_log());
    assert!(report.schedules_text.contains("NaN"));

    let dir = written(&report);
    // NaN != NaN, so compare the bytes that are hashed.
    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.digest, report.digest);
    assert_eq!(loaded.schedules_text, report.schedules_text);
    assert_eq!(loaded.log_bytes, report.log_bytes);
    assert_eq!(loaded.log.to_json_bytes(), report.log_bytes);
    assert_eq!(render_text(&loaded.log), report.schedules_text);
}
