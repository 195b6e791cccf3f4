//! Category model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use valkyrie_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Display order; lower ranks list first.
    pub rank: i32,
    pub created_date: Timestamp,
    pub modified_date: Option<Timestamp>,
    pub created_by: String,
    pub modified_by: Option<String>,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub rank: i32,
}
