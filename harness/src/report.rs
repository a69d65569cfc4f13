//! Schedule reports: the text listing, the JSON log, and their digest.
//!
//! # Text format
//!
//! ```text
//! Schedule 1 (Final EU: 12.50):
//! [
//!   Step 1: TRANSFORM Lumber x1 EU: 10.50
//!   Step 2: TRANSFORM Housing x2 EU: 12.50
//! ]
//!
//! ```
//!
//! # Digest
//!
//! Each file is hashed under `ReportArtifact`. The report digest is the
//! `ReportDigest` hash of the compact JSON object mapping file name to file
//! hash. Non-finite utilities render as `inf`/`-inf`/`NaN` in the text file.

use std::fmt::Write as _;

use mercator_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use mercator_search::log::ScheduleLogV1;

/// Text listing file name.
pub const SCHEDULES_FILENAME: &str = "schedules.txt";
/// JSON log file name.
pub const SCHEDULE_LOG_FILENAME: &str = "schedule_log.json";
/// Report digest file name.
pub const DIGEST_FILENAME: &str = "report_digest.txt";

/// A rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportV1 {
    pub log: ScheduleLogV1,
    /// `schedules.txt` content.
    pub schedules_text: String,
    /// `schedule_log.json` content.
    pub log_bytes: Vec<u8>,
    pub digest: ContentHash,
}

/// Render the text listing of `log`.
#[must_use]
pub fn render_text(log: &ScheduleLogV1) -> String {
    let mut out = String::new();
    for record in &log.records {
        let _ = write!(
            out,
            "Schedule {} (Final EU: {:.2}):\n[",
            record.schedule_num, record.final_eu
        );
        for (j, action) in record.actions.iter().enumerate() {
            let _ = write!(out, "\n  Step {}: {} EU: {:.2}", j + 1, action.action, action.eu);
        }
        out.push_str("\n]\n\n");
    }
    out
}

/// Report digest over the two report files.
///
/// # Panics
///
/// Never in practice: the digest basis is a `serde_json::Value` with string
/// keys, which always serializes.
#[must_use]
pub fn report_digest(schedules_text: &[u8], log_bytes: &[u8]) -> ContentHash {
    let basis = serde_json::json!({
        SCHEDULE_LOG_FILENAME: canonical_hash(HashDomain::ReportArtifact, log_bytes).as_str(),
        SCHEDULES_FILENAME: canonical_hash(HashDomain::ReportArtifact, schedules_text).as_str(),
    });
    let basis_bytes = serde_json::to_vec(&basis)
        .expect("serializing a serde_json::Value cannot fail; this is a bug if it does");
    canonical_hash(HashDomain::ReportDigest, &basis_bytes)
}

/// Render both files for `log` and compute the digest.
#[must_use]
pub fn build_report(log: &ScheduleLogV1) -> ReportV1 {
    let schedules_text = render_text(log);
    let log_bytes = log.to_json_bytes();
    let digest = report_digest(schedules_text.as_bytes(), &log_bytes);
    ReportV1 {
        log: log.clone(),
        schedules_text,
        log_bytes,
        digest,
    }
}
