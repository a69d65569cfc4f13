//! Run configuration: CSV world tables and run parameters.
//!
//! # Agent table
//!
//! ```text
//! Country,Population,Timber,Water
//! Atlantis,100,40,80
//! Carpania,80,20,60
//! ```
//!
//! One `Country` column (any position) plus one column per resource. The
//! `Population` column is mandatory. Every cell must parse as a finite
//! number.
//!
//! # Weight table
//!
//! ```text
//! Resource,Weight
//! Housing,3
//! HousingWaste,-2
//! ```
//!
//! Both tables are strict: ragged rows, non-numeric cells, duplicate
//! agents, duplicate resources and empty names are rejected with the
//! 1-based line number. Blank lines are skipped. Cells are trimmed; quoted
//! fields are not supported.

use std::path::{Path, PathBuf};

use mercator_kernel::state::agent::Agent;
use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::TemplateCatalog;
use mercator_search::policy::{OutputOrderV1, SchedulerPolicyV1};
use mercator_search::scorer::POPULATION;

use crate::contract::{EconomyWorldV1, WorldHarnessError};
use crate::worlds::economy;

const COUNTRY_COLUMN: &str = "Country";
const RESOURCE_COLUMN: &str = "Resource";
const WEIGHT_COLUMN: &str = "Weight";

/// Typed failure for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, detail: String },
    /// The table has no header line.
    EmptyTable { table: &'static str },
    /// A mandatory column is absent from the header.
    MissingColumn { column: String },
    /// A header names the same column twice.
    DuplicateColumn { column: String },
    /// A row has a different number of cells than the header.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A cell is not a finite number.
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    /// An agent or resource name cell is empty.
    EmptyName { line: usize },
    /// Two rows name the same agent.
    DuplicateAgent { line: usize, name: String },
    /// Two rows name the same resource.
    DuplicateResource { line: usize, name: String },
    /// The run parameter document is malformed.
    InvalidParameters { detail: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "cannot read {}: {detail}", path.display()),
            Self::EmptyTable { table } => write!(f, "{table} table has no header"),
            Self::MissingColumn { column } => write!(f, "missing required column '{column}'"),
            Self::DuplicateColumn { column } => write!(f, "duplicate column '{column}'"),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} cells, found {found}"),
            Self::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {line}: column '{column}' value '{value}' is not a number"),
            Self::EmptyName { line } => write!(f, "line {line}: empty name"),
            Self::DuplicateAgent { line, name } => {
                write!(f, "line {line}: duplicate agent '{name}'")
            }
            Self::DuplicateResource { line, name } => {
                write!(f, "line {line}: duplicate resource '{name}'")
            }
            Self::InvalidParameters { detail } => write!(f, "invalid run parameters: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Non-blank lines as `(1-based line number, trimmed cells)`.
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split(',').map(str::trim).collect()))
}

fn parse_number(line: usize, column: &str, cell: &str) -> Result<f64, ConfigError> {
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

fn check_width(line: usize, expected: usize, cells: &[&str]) -> Result<(), ConfigError> {
    if cells.len() == expected {
        Ok(())
    } else {
        Err(ConfigError::RaggedRow {
            line,
            expected,
            found: cells.len(),
        })
    }
}

/// Parse the agent table.
///
/// # Errors
///
/// Returns [`ConfigError`] on the first structural or numeric problem.
pub fn parse_agents_csv(text: &str) -> Result<WorldState, ConfigError> {
    let mut rows = rows(text);
    let (_, header) = rows.next().ok_or(ConfigError::EmptyTable { table: "agent" })?;

    for (i, column) in header.iter().enumerate() {
        if header[..i].contains(column) {
            return Err(ConfigError::DuplicateColumn {
                column: (*column).to_string(),
            });
        }
    }
    let country_index = header
        .iter()
        .position(|c| *c == COUNTRY_COLUMN)
        .ok_or_else(|| ConfigError::MissingColumn {
            column: COUNTRY_COLUMN.into(),
        })?;
    if !header.contains(&POPULATION) {
        return Err(ConfigError::MissingColumn {
            column: POPULATION.into(),
        });
    }

    let mut world = WorldState::default();
    for (line, cells) in rows {
        check_width(line, header.len(), &cells)?;
        let name = cells[country_index];
        if name.is_empty() {
            return Err(ConfigError::EmptyName { line });
        }
        let mut resources = ResourceBag::new();
        for (column, cell) in header.iter().zip(&cells) {
            if *column == COUNTRY_COLUMN {
                continue;
            }
            resources.set(*column, parse_number(line, column, cell)?);
        }
        if world.insert(Agent::new(name, resources)).is_some() {
            return Err(ConfigError::DuplicateAgent {
                line,
                name: name.to_string(),
            });
        }
    }
    Ok(world)
}

/// Parse the weight table.
///
/// # Errors
///
/// Returns [`ConfigError`] on the first structural or numeric problem.
pub fn parse_weights_csv(text: &str) -> Result<ResourceWeights, ConfigError> {
    let mut rows = rows(text);
    let (_, header) = rows.next().ok_or(ConfigError::EmptyTable { table: "weight" })?;
    let column = |name: &str| {
        header
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| ConfigError::MissingColumn {
                column: name.to_string(),
            })
    };
    let resource_index = column(RESOURCE_COLUMN)?;
    let weight_index = column(WEIGHT_COLUMN)?;

    let mut weights = ResourceWeights::new();
    let mut seen = std::collections::BTreeSet::new();
    for (line, cells) in rows {
        check_width(line, header.len(), &cells)?;
        let name = cells[resource_index];
        if name.is_empty() {
            return Err(ConfigError::EmptyName { line });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateResource {
                line,
                name: name.to_string(),
            });
        }
        weights.set(name, parse_number(line, WEIGHT_COLUMN, cells[weight_index])?);
    }
    Ok(weights)
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Read and parse an agent table file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file is unreadable, or any parse error.
pub fn load_agents(path: &Path) -> Result<WorldState, ConfigError> {
    parse_agents_csv(&read_text(path)?)
}

/// Read and parse a weight table file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file is unreadable, or any parse error.
pub fn load_weights(path: &Path) -> Result<ResourceWeights, ConfigError> {
    parse_weights_csv(&read_text(path)?)
}

/// Per-run knobs exposed to users. Everything else comes from
/// [`SchedulerPolicyV1::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub focal_agent: String,
    pub depth_bound: u32,
    pub frontier_max_size: usize,
    pub num_output_schedules: usize,
    pub track_resource_deltas: bool,
    pub output_order: OutputOrderV1,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            focal_agent: "Atlantis".into(),
            depth_bound: 5,
            frontier_max_size: 100,
            num_output_schedules: 5,
            track_resource_deltas: false,
            output_order: OutputOrderV1::CompletionOrder,
        }
    }
}

const PARAMETER_KEYS: &[&str] = &[
    "focal_agent",
    "depth_bound",
    "frontier_max_size",
    "num_output_schedules",
    "track_resource_deltas",
    "output_order",
];

fn invalid(detail: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameters {
        detail: detail.into(),
    }
}

fn unsigned(value: &serde_json::Value, key: &str) -> Result<u64, ConfigError> {
    value
        .as_u64()
        .ok_or_else(|| invalid(format!("{key} must be a non-negative integer")))
}

impl RunParameters {
    /// Parse a JSON object. Absent keys take their defaults; unknown keys
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameters`] on an unknown key or a
    /// mistyped value.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
        let object = value
            .as_object()
            .ok_or_else(|| invalid("run parameters must be a JSON object"))?;
        if let Some(key) = object.keys().find(|k| !PARAMETER_KEYS.contains(&k.as_str())) {
            return Err(invalid(format!("unknown key '{key}'")));
        }

        let mut params = Self::default();
        if let Some(v) = object.get("focal_agent") {
            params.focal_agent = v
                .as_str()
                .ok_or_else(|| invalid("focal_agent must be a string"))?
                .to_string();
        }
        if let Some(v) = object.get("depth_bound") {
            params.depth_bound = u32::try_from(unsigned(v, "depth_bound")?)
                .map_err(|_| invalid("depth_bound out of range"))?;
        }
        if let Some(v) = object.get("frontier_max_size") {
            params.frontier_max_size = usize::try_from(unsigned(v, "frontier_max_size")?)
                .map_err(|_| invalid("frontier_max_size out of range"))?;
        }
        if let Some(v) = object.get("num_output_schedules") {
            params.num_output_schedules = usize::try_from(unsigned(v, "num_output_schedules")?)
                .map_err(|_| invalid("num_output_schedules out of range"))?;
        }
        if let Some(v) = object.get("track_resource_deltas") {
            params.track_resource_deltas = v
                .as_bool()
                .ok_or_else(|| invalid("track_resource_deltas must be a boolean"))?;
        }
        if let Some(v) = object.get("output_order") {
            let name = v
                .as_str()
                .ok_or_else(|| invalid("output_order must be a string"))?;
            params.output_order = OutputOrderV1::parse(name)
                .ok_or_else(|| invalid(format!("unknown output_order '{name}'")))?;
        }
        Ok(params)
    }

    /// Read and parse a run parameter file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if unreadable, or
    /// [`ConfigError::InvalidParameters`] if not valid JSON or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_text(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// JSON echo for reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "focal_agent": self.focal_agent,
            "depth_bound": self.depth_bound,
            "frontier_max_size": self.frontier_max_size,
            "num_output_schedules": self.num_output_schedules,
            "track_resource_deltas": self.track_resource_deltas,
            "output_order": self.output_order.as_str(),
        })
    }

    /// The scheduler policy for this run.
    #[must_use]
    pub fn to_policy(&self) -> SchedulerPolicyV1 {
        SchedulerPolicyV1 {
            depth_bound: self.depth_bound,
            frontier_max_size: self.frontier_max_size,
            num_output_schedules: self.num_output_schedules,
            track_resource_deltas: self.track_resource_deltas,
            output_order: self.output_order,
            ..SchedulerPolicyV1::default()
        }
    }
}

/// A world loaded from CSV tables, searched with the built-in catalog.
#[derive(Debug, Clone)]
pub struct CsvWorld {
    world_id: String,
    world: WorldState,
    weights: ResourceWeights,
}

impl CsvWorld {
    #[must_use]
    pub fn new(world_id: impl Into<String>, world: WorldState, weights: ResourceWeights) -> Self {
        Self {
            world_id: world_id.into(),
            world,
            weights,
        }
    }

    /// Load both tables. The world id is the agent table's file stem.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] from either table.
    pub fn load(agents: &Path, weights: &Path) -> Result<Self, ConfigError> {
        let world_id = agents
            .file_stem()
            .map_or_else(|| "csv".to_string(), |s| s.to_string_lossy().into_owned());
        Ok(Self::new(world_id, load_agents(agents)?, load_weights(weights)?))
    }
}

impl EconomyWorldV1 for CsvWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn initial_world(&self) -> WorldState {
        self.world.clone()
    }

    fn weights(&self) -> ResourceWeights {
        self.weights.clone()
    }

    fn catalog(&self) -> Result<TemplateCatalog, WorldHarnessError> {
        Ok(economy::catalog()?)
    }
}
