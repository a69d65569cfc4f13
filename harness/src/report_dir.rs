//! Report directory persistence: write/read/verify `ReportV1` to/from disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   schedules.txt        text listing
//!   schedule_log.json    structured log (pretty JSON)
//!   report_digest.txt    ASCII digest string ("sha256:...")
//! ```
//!
//! The directory path is never part of the digest.
//!
//! # Fail-closed semantics
//!
//! - Missing report file → error
//! - Extra file → error, including a `.tmp_*` file left by an interrupted
//!   write
//! - Log that does not parse → error
//! - Text listing that does not match the log → error
//! - Digest mismatch → error

use std::collections::BTreeSet;
use std::path::Path;

use mercator_kernel::proof::hash::ContentHash;
use mercator_search::log::{ScheduleLogError, ScheduleLogV1};

use crate::report::{
    render_text, report_digest, ReportV1, DIGEST_FILENAME, SCHEDULES_FILENAME,
    SCHEDULE_LOG_FILENAME,
};

const REPORT_FILENAMES: &[&str] = &[SCHEDULES_FILENAME, SCHEDULE_LOG_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    /// I/O error during write.
    Io { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    /// I/O error during read.
    Io { detail: String },
    /// A report file is missing.
    MissingFile { filename: String },
    /// A file that is not part of the report exists in the directory.
    ExtraFile { name: String },
    /// `schedules.txt` is not UTF-8.
    InvalidText,
    /// `schedule_log.json` does not parse.
    LogParseError(ScheduleLogError),
    /// `schedules.txt` is not the rendering of `schedule_log.json`.
    TextMismatch,
    /// `report_digest.txt` is not a well-formed SHA-256 digest.
    MalformedDigest { found: String },
    /// `report_digest.txt` content doesn't match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing report file: {filename}"),
            Self::ExtraFile { name } => write!(f, "unexpected extra file: {name}"),
            Self::InvalidText => write!(f, "{SCHEDULES_FILENAME} is not valid UTF-8"),
            Self::LogParseError(e) => write!(f, "log parse error: {e}"),
            Self::TextMismatch => write!(
                f,
                "{SCHEDULES_FILENAME} does not match {SCHEDULE_LOG_FILENAME}"
            ),
            Self::MalformedDigest { found } => write!(f, "malformed digest: {found}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// Write a report to `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure.
pub fn write_report_dir(report: &ReportV1, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    write_atomic(&dir.join(SCHEDULES_FILENAME), report.schedules_text.as_bytes())?;
    write_atomic(&dir.join(SCHEDULE_LOG_FILENAME), &report.log_bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.digest.as_str().as_bytes())?;
    Ok(())
}

/// Read a report directory and verify it.
///
/// The stored digest is checked against the digest recomputed from the two
/// report files, and the text listing must equal the rendering of the log.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<ReportV1, ReportDirReadError> {
    let text_bytes = read_required(dir, SCHEDULES_FILENAME)?;
    let log_bytes = read_required(dir, SCHEDULE_LOG_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    for name in list_files(dir)? {
        if !REPORT_FILENAMES.contains(&name.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name });
        }
    }

    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    parse_digest(&stored)?;
    let recomputed = report_digest(&text_bytes, &log_bytes);
    if recomputed.as_str() != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let log = ScheduleLogV1::from_json_bytes(&log_bytes).map_err(ReportDirReadError::LogParseError)?;
    let schedules_text = String::from_utf8(text_bytes).map_err(|_| ReportDirReadError::InvalidText)?;
    if render_text(&log) != schedules_text {
        return Err(ReportDirReadError::TextMismatch);
    }

    Ok(ReportV1 {
        log,
        schedules_text,
        log_bytes,
        digest: recomputed,
    })
}

/// Verify a report directory without keeping its contents.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn verify_report_dir(dir: &Path) -> Result<ContentHash, ReportDirReadError> {
    read_report_dir(dir).map(|report| report.digest)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// A stored digest must be `sha256:` followed by 32 hex-encoded bytes.
fn parse_digest(stored: &str) -> Result<ContentHash, ReportDirReadError> {
    let malformed = || ReportDirReadError::MalformedDigest {
        found: stored.to_string(),
    };
    let hash = ContentHash::parse(stored).ok_or_else(malformed)?;
    if hash.algorithm() != "sha256" {
        return Err(malformed());
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hash.hex_digest(), &mut bytes).map_err(|_| malformed())?;
    Ok(hash)
}

/// Write bytes to a path via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })?;
    Ok(())
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingFile {
        filename: filename.to_string(),
    })
}

/// Regular files in `dir`. Leftover `write_atomic` temp files are listed
/// like any other file, so the caller rejects them.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let mut files = BTreeSet::new();
    let entries = std::fs::read_dir(dir).map_err(|e| ReportDirReadError::Io {
        detail: format!("read_dir: {e}"),
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ReportDirReadError::Io {
            detail: format!("dir entry: {e}"),
        })?;
        let file_type = entry.file_type().map_err(|e| ReportDirReadError::Io {
            detail: format!("file_type: {e}"),
        })?;
        if file_type.is_file() {
            files.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}
