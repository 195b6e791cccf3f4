use valkyrie_core::types::DbId;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors raised by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// An update targeted a primary key with no row behind it.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A delete was refused because other rows still reference the target.
    #[error("{entity} with id {id} is still referenced by {referenced_by}")]
    Referenced {
        entity: &'static str,
        id: DbId,
        referenced_by: &'static str,
    },

    /// An insert or update pointed a foreign key at a missing row.
    #[error("{entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: DbId },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Whether a sqlx error is a PostgreSQL foreign key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}
