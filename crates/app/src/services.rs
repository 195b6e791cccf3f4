//! Explicit wiring of repositories into handlers.

use std::sync::Arc;

use valkyrie_db::memory::InMemoryStore;
use valkyrie_db::repositories::{
    CategoryRepository, FieldRepository, FieldTypeRepository, PgCategoryRepo, PgFieldRepo,
    PgFieldTypeRepo,
};
use valkyrie_db::DbPool;

/// The three repositories every handler set is built from.
#[derive(Clone)]
pub struct Repositories {
    pub fields: Arc<dyn FieldRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub field_types: Arc<dyn FieldTypeRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            fields: Arc::new(PgFieldRepo::new(pool.clone())),
            categories: Arc::new(PgCategoryRepo::new(pool.clone())),
            field_types: Arc::new(PgFieldTypeRepo::new(pool)),
        }
    }

    /// Repositories over an in-process store.
    pub fn in_memory(store: &InMemoryStore) -> Self {
        Self {
            fields: Arc::new(store.fields()),
            categories: Arc::new(store.categories()),
            field_types: Arc::new(store.field_types()),
        }
    }
}
