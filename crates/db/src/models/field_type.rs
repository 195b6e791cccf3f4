//! Field type model (seed-only lookup rows).

use serde::Serialize;
use sqlx::FromRow;
use valkyrie_core::field_type::FieldTypeKind;
use valkyrie_core::types::DbId;

/// A row from the `field_types` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FieldType {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub field_type: FieldTypeKind,
    /// JSON schema descriptor, rendered as text.
    pub structure: String,
}

impl FieldType {
    /// The seed row for a kind, as the migrations insert it.
    pub fn seed(kind: FieldTypeKind) -> Self {
        Self {
            id: kind.id(),
            field_type: kind,
            structure: FieldTypeKind::DEFAULT_STRUCTURE.to_string(),
        }
    }
}
