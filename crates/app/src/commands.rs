//! Typed operation requests.
//!
//! Commands mutate state, queries read it. Request bodies deserialize
//! straight into these (camelCase keys); absent strings and ids default to
//! empty / zero so they fail validation instead of deserialization.

use serde::Deserialize;
use validator::Validate;
use valkyrie_core::types::DbId;

// ---------------------------------------------------------------------------
// Field commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldCommand {
    #[serde(default)]
    #[validate(length(max = 100, message = "Field name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Field label must be at most 100 characters"))]
    pub label: String,
    #[validate(length(max = 500, message = "Field description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: DbId,
    #[serde(default)]
    pub field_type_id: DbId,
}

/// Overwrites the mutable parts of a field. The field type is fixed at
/// creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldCommand {
    #[serde(default)]
    pub id: DbId,
    #[serde(default)]
    #[validate(length(max = 100, message = "Field name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Field label must be at most 100 characters"))]
    pub label: String,
    #[validate(length(max = 500, message = "Field description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: DbId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteFieldCommand {
    pub id: DbId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetFieldByIdQuery {
    pub id: DbId,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllFieldsQuery;

// ---------------------------------------------------------------------------
// Category commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryCommand {
    #[serde(default)]
    #[validate(length(max = 100, message = "Category name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Category description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub rank: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryCommand {
    #[serde(default)]
    pub id: DbId,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category name must be at most 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Category description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub rank: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteCategoryCommand {
    pub id: DbId,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllCategoriesQuery;

// ---------------------------------------------------------------------------
// Field type queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllFieldTypesQuery;
