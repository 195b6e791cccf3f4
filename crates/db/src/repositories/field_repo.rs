//! Repository for the `fields` table.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use valkyrie_core::audit;
use valkyrie_core::field_type::FieldTypeKind;
use valkyrie_core::types::{DbId, Timestamp};

use super::FieldRepository;
use crate::error::{is_foreign_key_violation, DbError, DbResult};
use crate::models::category::Category;
use crate::models::field::{CreateField, Field, FieldDetail};
use crate::models::field_type::FieldType;

/// Column list for plain fields queries.
const COLUMNS: &str = "id, name, label, description, category_id, field_type_id, \
    created_date, modified_date, created_by, modified_by";

/// Select list joining a field to its category and field type.
const DETAIL_SELECT: &str = "SELECT
        f.id, f.name, f.label, f.description, f.category_id, f.field_type_id,
        f.created_date, f.modified_date, f.created_by, f.modified_by,
        c.name AS category_name,
        c.description AS category_description,
        c.rank AS category_rank,
        c.created_date AS category_created_date,
        c.modified_date AS category_modified_date,
        c.created_by AS category_created_by,
        c.modified_by AS category_modified_by,
        t.field_type AS field_type_kind,
        t.structure::text AS field_type_structure
    FROM fields f
    JOIN categories c ON c.id = f.category_id
    JOIN field_types t ON t.id = f.field_type_id";

/// Flat row produced by [`DETAIL_SELECT`].
#[derive(FromRow)]
struct FieldDetailRow {
    #[sqlx(flatten)]
    field: Field,
    category_name: String,
    category_description: Option<String>,
    category_rank: i32,
    category_created_date: Timestamp,
    category_modified_date: Option<Timestamp>,
    category_created_by: String,
    category_modified_by: Option<String>,
    #[sqlx(try_from = "String")]
    field_type_kind: FieldTypeKind,
    field_type_structure: String,
}

impl From<FieldDetailRow> for FieldDetail {
    fn from(row: FieldDetailRow) -> Self {
        let category = Category {
            id: row.field.category_id,
            name: row.category_name,
            description: row.category_description,
            rank: row.category_rank,
            created_date: row.category_created_date,
            modified_date: row.category_modified_date,
            created_by: row.category_created_by,
            modified_by: row.category_modified_by,
        };
        let field_type = FieldType {
            id: row.field.field_type_id,
            field_type: row.field_type_kind,
            structure: row.field_type_structure,
        };
        FieldDetail {
            field: row.field,
            category,
            field_type,
        }
    }
}

/// PostgreSQL-backed field repository.
#[derive(Clone)]
pub struct PgFieldRepo {
    pool: PgPool,
}

impl PgFieldRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a foreign key violation on insert/update into the reference
/// the caller got wrong.
fn map_write_error(err: sqlx::Error, category_id: DbId, field_type_id: DbId) -> DbError {
    if !is_foreign_key_violation(&err) {
        return err.into();
    }
    let constraint = match &err {
        sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or_default().to_string(),
        _ => String::new(),
    };
    if constraint.contains("field_type") {
        DbError::MissingReference {
            entity: "FieldType",
            id: field_type_id,
        }
    } else {
        DbError::MissingReference {
            entity: "Category",
            id: category_id,
        }
    }
}

#[async_trait]
impl FieldRepository for PgFieldRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldDetail>> {
        let query = format!("{DETAIL_SELECT} WHERE f.id = $1");
        let row = sqlx::query_as::<_, FieldDetailRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(FieldDetail::from))
    }

    async fn list(&self) -> DbResult<Vec<FieldDetail>> {
        let query = format!("{DETAIL_SELECT} ORDER BY f.name ASC, f.id ASC");
        let rows = sqlx::query_as::<_, FieldDetailRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(FieldDetail::from).collect())
    }

    async fn create(&self, input: &CreateField) -> DbResult<Field> {
        let query = format!(
            "INSERT INTO fields
                (name, label, description, category_id, field_type_id, created_date, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Field>(&query)
            .bind(&input.name)
            .bind(&input.label)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.field_type_id)
            .bind(audit::now())
            .bind(audit::SYSTEM_ACTOR)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| map_write_error(err, input.category_id, input.field_type_id))
    }

    async fn update(&self, field: &Field) -> DbResult<Field> {
        let query = format!(
            "UPDATE fields SET
                name = $2,
                label = $3,
                description = $4,
                category_id = $5,
                field_type_id = $6,
                modified_date = $7,
                modified_by = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Field>(&query)
            .bind(field.id)
            .bind(&field.name)
            .bind(&field.label)
            .bind(&field.description)
            .bind(field.category_id)
            .bind(field.field_type_id)
            .bind(audit::now())
            .bind(audit::SYSTEM_ACTOR)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| map_write_error(err, field.category_id, field.field_type_id))?
            .ok_or(DbError::NotFound {
                entity: "Field",
                id: field.id,
            })
    }

    async fn delete(&self, id: DbId) -> DbResult<()> {
        sqlx::query("DELETE FROM fields WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
