//! Transfer representations returned across the system boundary.
//!
//! All keys serialize in camelCase. Field types render their kind by
//! symbolic name (`"Text"`), never by numeric code.

use serde::{Deserialize, Serialize};
use valkyrie_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub category_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub rank: i32,
    pub created_date: Timestamp,
    pub modified_date: Option<Timestamp>,
    pub created_by: String,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeDto {
    pub field_type_id: DbId,
    #[serde(rename = "type")]
    pub field_type: String,
    pub structure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDto {
    pub field_id: DbId,
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub created_date: Timestamp,
    pub modified_date: Option<Timestamp>,
    pub created_by: String,
    pub modified_by: Option<String>,
    pub category_id: DbId,
    pub category: Option<CategoryDto>,
    pub field_type_id: DbId,
    pub field_type: Option<FieldTypeDto>,
}
