//! Repository layer.
//!
//! One trait per entity. The PostgreSQL implementations hold a cloned
//! `PgPool`; [`crate::memory::InMemoryStore`] implements all three traits
//! over shared in-process state.
//!
//! Ordering contract for `list`: fields by name ascending, categories by
//! rank ascending, field types by id ascending.

use async_trait::async_trait;
use valkyrie_core::types::DbId;

use crate::error::DbResult;
use crate::models::category::{Category, CreateCategory};
use crate::models::field::{CreateField, Field, FieldDetail};
use crate::models::field_type::FieldType;

pub mod category_repo;
pub mod field_repo;
pub mod field_type_repo;

pub use category_repo::PgCategoryRepo;
pub use field_repo::PgFieldRepo;
pub use field_type_repo::PgFieldTypeRepo;

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by its ID.
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<Category>>;

    /// List all categories, ordered by rank ascending.
    async fn list(&self) -> DbResult<Vec<Category>>;

    /// Insert a category, stamping `created_date` and `created_by`.
    async fn create(&self, input: &CreateCategory) -> DbResult<Category>;

    /// Overwrite a category by primary key, stamping `modified_date` and
    /// `modified_by`. Fails with [`crate::DbError::NotFound`] if no row matches.
    async fn update(&self, category: &Category) -> DbResult<Category>;

    /// Delete a category. Absent rows are a no-op; a category still
    /// referenced by fields fails with [`crate::DbError::Referenced`].
    async fn delete(&self, id: DbId) -> DbResult<()>;

    /// Number of fields referencing the category.
    async fn count_fields(&self, id: DbId) -> DbResult<i64>;
}

/// Persistence operations for fields.
#[async_trait]
pub trait FieldRepository: Send + Sync {
    /// Find a field by its ID, including its category and field type.
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldDetail>>;

    /// List all fields with their relations, ordered by name ascending.
    async fn list(&self) -> DbResult<Vec<FieldDetail>>;

    /// Insert a field, stamping `created_date` and `created_by`.
    async fn create(&self, input: &CreateField) -> DbResult<Field>;

    /// Overwrite a field by primary key, stamping `modified_date` and
    /// `modified_by`. Fails with [`crate::DbError::NotFound`] if no row matches.
    async fn update(&self, field: &Field) -> DbResult<Field>;

    /// Delete a field. Absent rows are a no-op.
    async fn delete(&self, id: DbId) -> DbResult<()>;
}

/// Read-only access to the seeded field types.
#[async_trait]
pub trait FieldTypeRepository: Send + Sync {
    /// Find a field type by its ID.
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldType>>;

    /// List all field types, ordered by id ascending.
    async fn list(&self) -> DbResult<Vec<FieldType>>;
}
