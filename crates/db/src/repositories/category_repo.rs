//! Repository for the `categories` table.

use async_trait::async_trait;
use sqlx::PgPool;
use valkyrie_core::audit;
use valkyrie_core::types::DbId;

use super::CategoryRepository;
use crate::error::{is_foreign_key_violation, DbError, DbResult};
use crate::models::category::{Category, CreateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, rank, \
    created_date, modified_date, created_by, modified_by";

/// PostgreSQL-backed category repository.
#[derive(Clone)]
pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY rank ASC, id ASC");
        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn create(&self, input: &CreateCategory) -> DbResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, description, rank, created_date, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.rank)
            .bind(audit::now())
            .bind(audit::SYSTEM_ACTOR)
            .fetch_one(&self.pool)
            .await?;
        Ok(category)
    }

    async fn update(&self, category: &Category) -> DbResult<Category> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                description = $3,
                rank = $4,
                modified_date = $5,
                modified_by = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.rank)
            .bind(audit::now())
            .bind(audit::SYSTEM_ACTOR)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound {
                entity: "Category",
                id: category.id,
            })
    }

    async fn delete(&self, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_foreign_key_violation(&err) => Err(DbError::Referenced {
                entity: "Category",
                id,
                referenced_by: "Field",
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn count_fields(&self, id: DbId) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fields WHERE category_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
