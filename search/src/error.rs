//! Typed search errors.
//!
//! `SearchError` represents structural failures only. Infeasible branches
//! are not errors: the successor generator drops them silently. A
//! non-viable focal state (zero population, quality −∞) is a valid score,
//! not an error.

use mercator_kernel::state::error::StateError;

/// Typed failure for a search run. Any occurrence aborts the run; there is
/// no partial result and no retry.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A state-layer failure surfaced during search.
    ///
    /// `UnknownAgent` means the focal agent (or an expected-utility target)
    /// is absent. `InsufficientResources` means a pre-checked branch still
    /// failed to apply, which is a feasibility-contract violation.
    State(StateError),
    /// The policy failed pre-flight validation.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::State(e) => write!(f, "state error during search: {e}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid scheduler policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            Self::InvalidPolicy { .. } => None,
        }
    }
}

impl From<StateError> for SearchError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}
