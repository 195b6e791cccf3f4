//! In-memory repository implementations.
//!
//! [`InMemoryStore`] owns one shared state and hands out per-entity
//! repositories over it, so foreign keys and restrict-on-delete behave the
//! way the PostgreSQL schema does. Used by tests and local runs without a
//! database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use valkyrie_core::audit;
use valkyrie_core::field_type::FieldTypeKind;
use valkyrie_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::category::{Category, CreateCategory};
use crate::models::field::{CreateField, Field, FieldDetail};
use crate::models::field_type::FieldType;
use crate::repositories::{CategoryRepository, FieldRepository, FieldTypeRepository};

#[derive(Default)]
struct MemoryState {
    categories: BTreeMap<DbId, Category>,
    fields: BTreeMap<DbId, Field>,
    field_types: BTreeMap<DbId, FieldType>,
    last_category_id: DbId,
    last_field_id: DbId,
}

impl MemoryState {
    fn check_references(&self, category_id: DbId, field_type_id: DbId) -> DbResult<()> {
        if !self.categories.contains_key(&category_id) {
            return Err(DbError::MissingReference {
                entity: "Category",
                id: category_id,
            });
        }
        if !self.field_types.contains_key(&field_type_id) {
            return Err(DbError::MissingReference {
                entity: "FieldType",
                id: field_type_id,
            });
        }
        Ok(())
    }

    fn detail(&self, field: &Field) -> Option<FieldDetail> {
        Some(FieldDetail {
            field: field.clone(),
            category: self.categories.get(&field.category_id)?.clone(),
            field_type: self.field_types.get(&field.field_type_id)?.clone(),
        })
    }
}

/// Shared in-process store seeded with the six field types.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a store holding only the seeded field types.
    pub fn new() -> Self {
        let state = MemoryState {
            field_types: FieldTypeKind::ALL
                .into_iter()
                .map(|kind| (kind.id(), FieldType::seed(kind)))
                .collect(),
            ..MemoryState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn categories(&self) -> MemoryCategoryRepo {
        MemoryCategoryRepo {
            state: Arc::clone(&self.state),
        }
    }

    pub fn fields(&self) -> MemoryFieldRepo {
        MemoryFieldRepo {
            state: Arc::clone(&self.state),
        }
    }

    pub fn field_types(&self) -> MemoryFieldTypeRepo {
        MemoryFieldTypeRepo {
            state: Arc::clone(&self.state),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryCategoryRepo {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by_key(|c| (c.rank, c.id));
        Ok(categories)
    }

    async fn create(&self, input: &CreateCategory) -> DbResult<Category> {
        let mut state = self.state.write().await;
        state.last_category_id += 1;
        let category = Category {
            id: state.last_category_id,
            name: input.name.clone(),
            description: input.description.clone(),
            rank: input.rank,
            created_date: audit::now(),
            modified_date: None,
            created_by: audit::SYSTEM_ACTOR.to_string(),
            modified_by: None,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> DbResult<Category> {
        let mut state = self.state.write().await;
        let stored = state
            .categories
            .get_mut(&category.id)
            .ok_or(DbError::NotFound {
                entity: "Category",
                id: category.id,
            })?;
        stored.name = category.name.clone();
        stored.description = category.description.clone();
        stored.rank = category.rank;
        stored.modified_date = Some(audit::now());
        stored.modified_by = Some(audit::SYSTEM_ACTOR.to_string());
        Ok(stored.clone())
    }

    async fn delete(&self, id: DbId) -> DbResult<()> {
        let mut state = self.state.write().await;
        if state.fields.values().any(|f| f.category_id == id) {
            return Err(DbError::Referenced {
                entity: "Category",
                id,
                referenced_by: "Field",
            });
        }
        state.categories.remove(&id);
        Ok(())
    }

    async fn count_fields(&self, id: DbId) -> DbResult<i64> {
        let state = self.state.read().await;
        let count = state.fields.values().filter(|f| f.category_id == id).count();
        Ok(count as i64)
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryFieldRepo {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl FieldRepository for MemoryFieldRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldDetail>> {
        let state = self.state.read().await;
        Ok(state.fields.get(&id).and_then(|f| state.detail(f)))
    }

    async fn list(&self) -> DbResult<Vec<FieldDetail>> {
        let state = self.state.read().await;
        let mut fields: Vec<FieldDetail> =
            state.fields.values().filter_map(|f| state.detail(f)).collect();
        fields.sort_by(|a, b| {
            a.field
                .name
                .cmp(&b.field.name)
                .then(a.field.id.cmp(&b.field.id))
        });
        Ok(fields)
    }

    async fn create(&self, input: &CreateField) -> DbResult<Field> {
        let mut state = self.state.write().await;
        state.check_references(input.category_id, input.field_type_id)?;
        state.last_field_id += 1;
        let field = Field {
            id: state.last_field_id,
            name: input.name.clone(),
            label: input.label.clone(),
            description: input.description.clone(),
            category_id: input.category_id,
            field_type_id: input.field_type_id,
            created_date: audit::now(),
            modified_date: None,
            created_by: audit::SYSTEM_ACTOR.to_string(),
            modified_by: None,
        };
        state.fields.insert(field.id, field.clone());
        Ok(field)
    }

    async fn update(&self, field: &Field) -> DbResult<Field> {
        let mut state = self.state.write().await;
        if !state.fields.contains_key(&field.id) {
            return Err(DbError::NotFound {
                entity: "Field",
                id: field.id,
            });
        }
        state.check_references(field.category_id, field.field_type_id)?;

        let stored = state
            .fields
            .get_mut(&field.id)
            .ok_or(DbError::NotFound {
                entity: "Field",
                id: field.id,
            })?;
        stored.name = field.name.clone();
        stored.label = field.label.clone();
        stored.description = field.description.clone();
        stored.category_id = field.category_id;
        stored.field_type_id = field.field_type_id;
        stored.modified_date = Some(audit::now());
        stored.modified_by = Some(audit::SYSTEM_ACTOR.to_string());
        Ok(stored.clone())
    }

    async fn delete(&self, id: DbId) -> DbResult<()> {
        self.state.write().await.fields.remove(&id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryFieldTypeRepo {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait]
impl FieldTypeRepository for MemoryFieldTypeRepo {
    async fn find_by_id(&self, id: DbId) -> DbResult<Option<FieldType>> {
        Ok(self.state.read().await.field_types.get(&id).cloned())
    }

    async fn list(&self) -> DbResult<Vec<FieldType>> {
        // BTreeMap iteration is already id-ascending.
        Ok(self.state.read().await.field_types.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_category(name: &str, rank: i32) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
            description: None,
            rank,
        }
    }

    fn new_field(name: &str, category_id: DbId) -> CreateField {
        CreateField {
            name: name.to_string(),
            label: format!("{name} label"),
            description: None,
            category_id,
            field_type_id: FieldTypeKind::Text.id(),
        }
    }

    #[tokio::test]
    async fn new_store_holds_six_field_types_in_id_order() {
        let store = InMemoryStore::new();
        let types = store.field_types().list().await.unwrap();

        let kinds: Vec<FieldTypeKind> = types.iter().map(|t| t.field_type).collect();
        assert_eq!(kinds, FieldTypeKind::ALL.to_vec());
        assert!(types.iter().all(|t| t.structure == "{}"));
    }

    #[tokio::test]
    async fn create_category_stamps_audit_fields() {
        let store = InMemoryStore::new();
        let category = store
            .categories()
            .create(&new_category("Narrative", 2))
            .await
            .unwrap();

        assert_eq!(category.id, 1);
        assert_eq!(category.created_by, audit::SYSTEM_ACTOR);
        assert!(category.modified_date.is_none());
        assert!(category.modified_by.is_none());
    }

    #[tokio::test]
    async fn categories_list_by_rank() {
        let store = InMemoryStore::new();
        let repo = store.categories();
        repo.create(&new_category("Third", 3)).await.unwrap();
        repo.create(&new_category("First", 1)).await.unwrap();
        repo.create(&new_category("Second", 2)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let store = InMemoryStore::new();
        let repo = store.categories();
        let mut category = repo.create(&new_category("A", 1)).await.unwrap();
        category.id = 99;

        let err = repo.update(&category).await.unwrap_err();
        assert_matches!(err, DbError::NotFound { entity: "Category", id: 99 });
    }

    #[tokio::test]
    async fn delete_referenced_category_is_refused() {
        let store = InMemoryStore::new();
        let category = store
            .categories()
            .create(&new_category("A", 1))
            .await
            .unwrap();
        store
            .fields()
            .create(&new_field("F", category.id))
            .await
            .unwrap();

        let err = store.categories().delete(category.id).await.unwrap_err();
        assert_matches!(err, DbError::Referenced { entity: "Category", .. });
        assert!(store.categories().find_by_id(category.id).await.unwrap().is_some());
        assert_eq!(store.categories().count_fields(category.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_absent_rows_is_noop() {
        let store = InMemoryStore::new();
        store.categories().delete(42).await.unwrap();
        store.fields().delete(42).await.unwrap();
    }

    #[tokio::test]
    async fn create_field_with_missing_category_fails() {
        let store = InMemoryStore::new();
        let err = store.fields().create(&new_field("F", 5)).await.unwrap_err();

        assert_matches!(err, DbError::MissingReference { entity: "Category", id: 5 });
        assert!(store.fields().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fields_list_by_name_with_relations() {
        let store = InMemoryStore::new();
        let category = store
            .categories()
            .create(&new_category("Cat", 1))
            .await
            .unwrap();
        let repo = store.fields();
        repo.create(&new_field("b", category.id)).await.unwrap();
        repo.create(&new_field("B", category.id)).await.unwrap();
        repo.create(&new_field("A", category.id)).await.unwrap();

        let fields = repo.list().await.unwrap();
        let names: Vec<&str> = fields.iter().map(|d| d.field.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "b"]);
        assert!(fields.iter().all(|d| d.category.name == "Cat"));
        assert!(fields
            .iter()
            .all(|d| d.field_type.field_type == FieldTypeKind::Text));
    }

    #[tokio::test]
    async fn update_field_preserves_creation_stamp() {
        let store = InMemoryStore::new();
        let category = store
            .categories()
            .create(&new_category("Cat", 1))
            .await
            .unwrap();
        let repo = store.fields();
        let created = repo.create(&new_field("Old", category.id)).await.unwrap();

        let mut changed = created.clone();
        changed.name = "New".to_string();
        let updated = repo.update(&changed).await.unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.created_date, created.created_date);
        assert_eq!(updated.created_by, created.created_by);
        assert!(updated.modified_date.unwrap() >= created.created_date);
        assert_eq!(updated.modified_by.as_deref(), Some(audit::SYSTEM_ACTOR));
    }
}
