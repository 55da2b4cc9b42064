use crate::types::DbId;

/// Domain error taxonomy. Every variant is recoverable at the API
/// boundary; none of them crash the process.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A malformed input field (empty name, empty image, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A foreign-key target is absent (e.g. a figure created against a
    /// series id that does not exist).
    #[error("{entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: DbId },

    /// A uniqueness violation, e.g. a duplicate user email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, unknown, or disabled credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The persistence engine is unreachable. Distinct from the
    /// client-facing kinds above; surfaced as a server error.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
