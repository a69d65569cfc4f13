//! Economy world contract: the minimal trait a world must implement.
//!
//! Worlds provide domain data only: the initial agents, the weight table
//! and the transform catalog. Searching, scoring and report writing are
//! runner concerns.

use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::{CatalogError, TemplateCatalog};

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldHarnessError {
    /// The world's template list is not a valid catalog.
    Catalog(CatalogError),
}

impl std::fmt::Display for WorldHarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "invalid template catalog: {e}"),
        }
    }
}

impl std::error::Error for WorldHarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
        }
    }
}

impl From<CatalogError> for WorldHarnessError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

/// The contract a world must implement to be run by the harness runner.
///
/// A world provides:
/// - A unique identifier
/// - The initial agents and their holdings
/// - The signed resource weight table
/// - The transform catalog
pub trait EconomyWorldV1 {
    /// Unique world identifier (e.g., `"economy_demo"`).
    fn world_id(&self) -> &str;

    /// A fresh copy of the initial world.
    fn initial_world(&self) -> WorldState;

    /// Resource weights for quality scoring.
    fn weights(&self) -> ResourceWeights;

    /// The transform templates available to the focal agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::Catalog`] if the templates do not form a
    /// valid catalog.
    fn catalog(&self) -> Result<TemplateCatalog, WorldHarnessError>;
}
