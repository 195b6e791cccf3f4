//! Startup seed data.
//!
//! Field types are seeded by the migrations. Default categories are inserted
//! at startup only when the `categories` table is empty.

use crate::models::category::CreateCategory;
use crate::repositories::CategoryRepository;
use crate::DbResult;

/// Categories inserted into an empty store.
pub fn default_categories() -> Vec<CreateCategory> {
    vec![
        CreateCategory {
            name: "Subject Info".to_string(),
            description: None,
            rank: 1,
        },
        CreateCategory {
            name: "Narrative".to_string(),
            description: None,
            rank: 2,
        },
    ]
}

/// Insert [`default_categories`] if no category exists yet.
///
/// Returns the number of categories inserted.
pub async fn seed_default_categories(repo: &dyn CategoryRepository) -> DbResult<usize> {
    if !repo.list().await?.is_empty() {
        return Ok(0);
    }

    let defaults = default_categories();
    for input in &defaults {
        repo.create(input).await?;
    }
    tracing::info!(count = defaults.len(), "Seeded default categories");
    Ok(defaults.len())
}
