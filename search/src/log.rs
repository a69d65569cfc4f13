//! `ScheduleLogV1`: structured record of reported schedules.
//!
//! Serialized as a JSON array, one object per schedule:
//! `{schedule_num, final_eu, actions: [{action, eu, delta}]}`.
//! `schedule_num` is 1-based. `eu` is the utility ledger entry after the
//! step; `delta` is the focal resource delta, recorded whether or not the
//! policy tracks deltas.
//!
//! JSON has no non-finite numbers. Non-finite values are written as the
//! strings `"inf"`, `"-inf"` and `"NaN"`, the same spelling the text listing
//! uses, and read back to the same values.

use std::collections::{BTreeMap, BTreeSet};

use mercator_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use mercator_kernel::state::bag::ResourceBag;

use crate::search::CompletedScheduleV1;
use crate::successor::ResourceDelta;

/// The structured log of one search run's reported schedules.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLogV1 {
    pub records: Vec<ScheduleRecordV1>,
}

/// One reported schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRecordV1 {
    /// 1-based position in the report.
    pub schedule_num: usize,
    /// Last utility ledger entry.
    pub final_eu: f64,
    pub actions: Vec<ActionRecordV1>,
}

/// One step of a reported schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecordV1 {
    /// Rendered action descriptor.
    pub action: String,
    /// Utility ledger entry after this step.
    pub eu: f64,
    pub delta: Option<ResourceDelta>,
}

/// Failure decoding a schedule log from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleLogError {
    /// The document is not valid JSON.
    InvalidJson { detail: String },
    /// A required field is missing or has the wrong type.
    Malformed { path: String, expected: &'static str },
}

impl std::fmt::Display for ScheduleLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson { detail } => write!(f, "schedule log is not valid JSON: {detail}"),
            Self::Malformed { path, expected } => {
                write!(f, "schedule log field {path}: expected {expected}")
            }
        }
    }
}

impl std::error::Error for ScheduleLogError {}

impl ScheduleLogV1 {
    /// Build the log from completed schedules, numbered from 1 in the given
    /// order.
    #[must_use]
    pub fn from_completed(schedules: &[CompletedScheduleV1]) -> Self {
        let records = schedules
            .iter()
            .enumerate()
            .map(|(i, schedule)| ScheduleRecordV1 {
                schedule_num: i + 1,
                final_eu: schedule.final_utility(),
                actions: schedule
                    .actions
                    .iter()
                    .enumerate()
                    .map(|(j, action)| ActionRecordV1 {
                        action: action.to_string(),
                        eu: schedule
                            .utilities
                            .get(j + 1)
                            .copied()
                            .unwrap_or(f64::NEG_INFINITY),
                        delta: schedule.step_deltas.get(j).cloned(),
                    })
                    .collect(),
            })
            .collect();
        Self { records }
    }

    /// JSON value of the log.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Array(self.records.iter().map(record_to_json).collect())
    }

    /// Pretty-printed JSON bytes. Object keys are sorted, so the bytes are
    /// deterministic for a given log.
    ///
    /// # Panics
    ///
    /// Never in practice: a `serde_json::Value` with string keys always
    /// serializes.
    #[must_use]
    pub fn to_json_bytes(&self) -> Vec<u8> {
        let mut bytes = serde_json::to_vec_pretty(&self.to_json_value())
            .expect("serializing a serde_json::Value cannot fail; this is a bug if it does");
        bytes.push(b'\n');
        bytes
    }

    /// Content digest of [`Self::to_json_bytes`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::ScheduleLog, &self.to_json_bytes())
    }

    /// Parse a log from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLogError`] if the bytes are not JSON or do not
    /// have the log's shape.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ScheduleLogError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ScheduleLogError::InvalidJson {
                detail: e.to_string(),
            })?;
        Self::from_json_value(&value)
    }

    /// Parse a log from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleLogError::Malformed`] naming the first field that
    /// is missing or mistyped.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, ScheduleLogError> {
        let entries = value.as_array().ok_or_else(|| malformed("$", "array"))?;
        let mut records = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            records.push(record_from_json(entry, &format!("$[{i}]"))?);
        }
        Ok(Self { records })
    }

    /// Cumulative per-resource series for the schedule numbered
    /// `schedule_num`, starting from `initial`.
    ///
    /// Each series has one point per step plus the starting point. Resources
    /// tracked are those in `initial` plus any appearing in a delta. Steps
    /// without a retained delta contribute no change.
    ///
    /// Returns `None` if no schedule has that number.
    #[must_use]
    pub fn resource_trajectory(
        &self,
        schedule_num: usize,
        initial: &ResourceBag,
    ) -> Option<BTreeMap<String, Vec<f64>>> {
        let record = self.records.iter().find(|r| r.schedule_num == schedule_num)?;

        let mut resources: BTreeSet<&str> = initial.resource_names().collect();
        for action in &record.actions {
            if let Some(delta) = &action.delta {
                resources.extend(delta.resource_names());
            }
        }

        let mut series = BTreeMap::new();
        for resource in resources {
            let mut points = Vec::with_capacity(record.actions.len() + 1);
            let mut current = initial.get(resource);
            points.push(current);
            for action in &record.actions {
                current += action.delta.as_ref().map_or(0.0, |d| d.get(resource));
                points.push(current);
            }
            series.insert(resource.to_string(), points);
        }
        Some(series)
    }
}

fn malformed(path: &str, expected: &'static str) -> ScheduleLogError {
    ScheduleLogError::Malformed {
        path: path.to_string(),
        expected,
    }
}

fn record_to_json(record: &ScheduleRecordV1) -> serde_json::Value {
    serde_json::json!({
        "schedule_num": record.schedule_num,
        "final_eu": number_to_json(record.final_eu),
        "actions": record.actions.iter().map(action_to_json).collect::<Vec<_>>(),
    })
}

fn action_to_json(action: &ActionRecordV1) -> serde_json::Value {
    serde_json::json!({
        "action": action.action,
        "eu": number_to_json(action.eu),
        "delta": action.delta.as_ref().map(delta_to_json),
    })
}

fn delta_to_json(delta: &ResourceDelta) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = delta
        .iter()
        .map(|(resource, change)| (resource.to_string(), number_to_json(change)))
        .collect();
    serde_json::Value::Object(map)
}

const POS_INF: &str = "inf";
const NEG_INF: &str = "-inf";
const NAN: &str = "NaN";

fn number_to_json(x: f64) -> serde_json::Value {
    if x.is_nan() {
        NAN.into()
    } else if x.is_infinite() {
        serde_json::Value::from(if x > 0.0 { POS_INF } else { NEG_INF })
    } else {
        x.into()
    }
}

fn number_from_json(
    value: Option<&serde_json::Value>,
    path: &str,
) -> Result<f64, ScheduleLogError> {
    const EXPECTED: &str = "number, \"inf\", \"-inf\" or \"NaN\"";
    match value {
        Some(serde_json::Value::String(s)) => match s.as_str() {
            POS_INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            NAN => Ok(f64::NAN),
            _ => Err(malformed(path, EXPECTED)),
        },
        Some(v) => v.as_f64().ok_or_else(|| malformed(path, EXPECTED)),
        None => Err(malformed(path, EXPECTED)),
    }
}

fn record_from_json(value: &serde_json::Value, path: &str) -> Result<ScheduleRecordV1, ScheduleLogError> {
    let schedule_num = value
        .get("schedule_num")
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| malformed(&format!("{path}.schedule_num"), "unsigned integer"))?;
    let final_eu = number_from_json(value.get("final_eu"), &format!("{path}.final_eu"))?;
    let entries = value
        .get("actions")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| malformed(&format!("{path}.actions"), "array"))?;

    let mut actions = Vec::with_capacity(entries.len());
    for (j, entry) in entries.iter().enumerate() {
        let step = format!("{path}.actions[{j}]");
        let action = entry
            .get("action")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| malformed(&format!("{step}.action"), "string"))?
            .to_string();
        let eu = number_from_json(entry.get("eu"), &format!("{step}.eu"))?;
        let delta = match entry.get("delta") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(map)) => {
                let mut delta = ResourceDelta::new();
                for (resource, change) in map {
                    let change = number_from_json(Some(change), &format!("{step}.delta.{resource}"))?;
                    delta.set(resource.as_str(), change);
                }
                Some(delta)
            }
            Some(_) => return Err(malformed(&format!("{step}.delta"), "object or null")),
        };
        actions.push(ActionRecordV1 { action, eu, delta });
    }

    Ok(ScheduleRecordV1 {
        schedule_num,
        final_eu,
        actions,
    })
}
