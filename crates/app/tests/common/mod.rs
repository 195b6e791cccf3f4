#![allow(dead_code)]

use valkyrie_app::commands::{CreateCategoryCommand, CreateFieldCommand};
use valkyrie_app::{Dispatcher, Repositories};
use valkyrie_core::field_type::FieldTypeKind;
use valkyrie_core::types::DbId;
use valkyrie_db::memory::InMemoryStore;

/// Fresh in-memory store plus a dispatcher wired to it.
pub fn test_dispatcher() -> (InMemoryStore, Dispatcher) {
    let store = InMemoryStore::new();
    let dispatcher = Dispatcher::new(&Repositories::in_memory(&store));
    (store, dispatcher)
}

/// Create a category and return its id.
pub async fn seed_category(dispatcher: &Dispatcher, name: &str, rank: i32) -> DbId {
    dispatcher
        .categories()
        .create(&CreateCategoryCommand {
            name: name.to_string(),
            description: None,
            rank,
        })
        .await
        .expect("category should be created")
        .category_id
}

pub fn create_field_cmd(name: &str, category_id: DbId) -> CreateFieldCommand {
    CreateFieldCommand {
        name: name.to_string(),
        label: format!("{name} Label"),
        description: None,
        category_id,
        field_type_id: FieldTypeKind::Text.id(),
    }
}
