//! Typed state-layer errors.
//!
//! These are structural failures. The search layer pre-checks feasibility
//! before every mutation, so an `InsufficientResources` reaching the caller
//! from a search run signals a broken feasibility check, not a normal
//! outcome.

/// Typed failure for state queries and guarded mutations. Fail-closed: an
/// operation that returns an error has left every agent unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// The requested agent is not in the world.
    UnknownAgent { name: String },
    /// A consumption or transfer exceeds the holder's quantity.
    InsufficientResources {
        agent: String,
        resource: String,
        needed: f64,
        held: f64,
    },
    /// A transfer request is structurally invalid (self-transfer, negative or
    /// non-finite amount).
    MalformedTransfer { detail: String },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAgent { name } => write!(f, "agent '{name}' not found"),
            Self::InsufficientResources {
                agent,
                resource,
                needed,
                held,
            } => write!(
                f,
                "{agent} lacks {resource}: needs {needed}, has {held}"
            ),
            Self::MalformedTransfer { detail } => write!(f, "malformed transfer: {detail}"),
        }
    }
}

impl std::error::Error for StateError {}
