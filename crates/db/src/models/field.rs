//! Field model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use valkyrie_core::types::{DbId, Timestamp};

use super::category::Category;
use super::field_type::FieldType;

/// A row from the `fields` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Field {
    pub id: DbId,
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub field_type_id: DbId,
    pub created_date: Timestamp,
    pub modified_date: Option<Timestamp>,
    pub created_by: String,
    pub modified_by: Option<String>,
}

/// DTO for creating a new field.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateField {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub field_type_id: DbId,
}

/// A field together with the category and field type it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDetail {
    pub field: Field,
    pub category: Category,
    pub field_type: FieldType,
}
