//! Repository for the `field_types` lookup table.

use async_trait::async_trait;
use sqlx::PgPool;
use valkyrie_core::types::DbId;

use super::FieldTypeRepository;
use crate::error::DbResult;
use crate::models::field_type::FieldType;

/// Column list for field_types queries. `structure` is JSONB on disk.
const COLUMNS: &str = "id, field_type, structure::text AS structure";

/// PostgreSQL-backed field type repository.
#[derive(Clone)]
pub struct PgFieldTypeRepo {
    pool: PgPool,
}

impl PgFieldTypeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldTypeRepository for PgFieldTypeRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldType>> {
        let query = format!("SELECT {COLUMNS} FROM field_types WHERE id = $1");
        let field_type = sqlx::query_as::<_, FieldType>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(field_type)
    }

    async fn list(&self) -> DbResult<Vec<FieldType>> {
        let query = format!("SELECT {COLUMNS} FROM field_types ORDER BY id ASC");
        let field_types = sqlx::query_as::<_, FieldType>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(field_types)
    }
}
