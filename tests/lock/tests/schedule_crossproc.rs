//! Cross-process determinism: spawns the `schedule_fixture` binary under
//! four environment variants and asserts byte-identical output.

use std::path::Path;
use std::process::Command;

/// Path to the compiled `schedule_fixture` binary.
///
/// No `.exe` suffix handling; Windows is not a target.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("schedule_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "schedule_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(baseline.contains("report_digest=sha256:"));
    assert!(baseline.contains("schedule_log_digest=sha256:"));
    assert!(baseline.contains("termination=frontier_exhausted"));
    assert!(baseline.contains("final_world_fingerprint.0=sha256:"));

    let variant_cwd = run_variant("/tmp", &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes from {root} to /tmp");

    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        &root,
        &[
            ("MERCATOR_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
            ("RUST_LOG", "trace"),
        ],
    );
    assert_eq!(
        baseline, variant_noise,
        "output differs with spurious env vars (MERCATOR_NOISE, TZ, HOME, RUST_LOG)"
    );
}

#[test]
fn fixture_reports_expected_counts() {
    let output = run_variant(&workspace_root(), &[]);
    let value = |key: &str| {
        output
            .lines()
            .find_map(|line| line.strip_prefix(&format!("{key}=")).map(str::to_string))
            .unwrap_or_else(|| panic!("missing {key} in output:\n{output}"))
    };
    assert_eq!(value("schedules_reported"), "5");
    let completed: u64 = value("fixture_completed").parse().unwrap();
    assert!(completed > 0);
}
