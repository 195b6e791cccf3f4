use valkyrie_core::error::CoreError;
use valkyrie_db::DbError;

/// Failure of a command or query handler.
///
/// Domain outcomes (validation, not-found, still-referenced) travel as
/// [`CoreError`]; anything the store could not do is kept as the raw
/// [`sqlx::Error`] so the transport can log it and answer opaquely.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CoreError::NotFound { entity, id }.into(),
            DbError::Referenced { entity, id, .. } => CoreError::Referenced { entity, id }.into(),
            DbError::MissingReference { entity, id } => {
                CoreError::Validation(format!("{entity} with ID {id} does not exist")).into()
            }
            DbError::Sqlx(err) => ServiceError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_reference_becomes_validation_error() {
        let err = ServiceError::from(DbError::MissingReference {
            entity: "Category",
            id: 3,
        });
        assert_matches!(
            err,
            ServiceError::Core(CoreError::Validation(msg)) if msg == "Category with ID 3 does not exist"
        );
    }

    #[test]
    fn referenced_keeps_entity_and_id() {
        let err = ServiceError::from(DbError::Referenced {
            entity: "Category",
            id: 8,
            referenced_by: "Field",
        });
        assert_matches!(
            err,
            ServiceError::Core(CoreError::Referenced { entity: "Category", id: 8 })
        );
    }

    #[test]
    fn sqlx_errors_stay_opaque() {
        let err = ServiceError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_matches!(err, ServiceError::Database(sqlx::Error::PoolTimedOut));
    }
}
