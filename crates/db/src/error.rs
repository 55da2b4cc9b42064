//! Repository error type.
//!
//! Referential-integrity outcomes (missing row, dangling foreign key,
//! uniqueness violation) are part of the repository contract here, so
//! they are classified in this crate rather than at the HTTP boundary.

use amiibox_core::types::DbId;

/// Outcome of a repository operation that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The addressed row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced row does not exist (foreign-key target absent).
    #[error("{entity} with id {id} does not exist")]
    ForeignKey { entity: &'static str, id: DbId },

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Any other database failure, passed through for classification at
    /// the API boundary (connectivity errors become 503 there).
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// PostgreSQL error code for unique constraint violations.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Returns `true` when `err` is a unique violation on the named constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
