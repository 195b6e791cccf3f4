//! Closed enumeration of field data kinds.
//!
//! Each variant's discriminant matches the seed row id in the `field_types`
//! table. The database stores the symbolic name (`"Text"`), never the number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Data kind of a field definition.
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTypeKind {
    Date = 1,
    Time = 2,
    Number = 3,
    Text = 4,
    Boolean = 5,
    SingleSelect = 6,
}

impl FieldTypeKind {
    /// Every kind, in seed (id) order.
    pub const ALL: [FieldTypeKind; 6] = [
        FieldTypeKind::Date,
        FieldTypeKind::Time,
        FieldTypeKind::Number,
        FieldTypeKind::Text,
        FieldTypeKind::Boolean,
        FieldTypeKind::SingleSelect,
    ];

    /// Structure descriptor every seed row starts with.
    pub const DEFAULT_STRUCTURE: &'static str = "{}";

    /// Return the seed row id.
    pub fn id(self) -> DbId {
        self as DbId
    }

    /// Symbolic name as stored and rendered.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldTypeKind::Date => "Date",
            FieldTypeKind::Time => "Time",
            FieldTypeKind::Number => "Number",
            FieldTypeKind::Text => "Text",
            FieldTypeKind::Boolean => "Boolean",
            FieldTypeKind::SingleSelect => "SingleSelect",
        }
    }

    /// Look up a kind by its seed row id.
    pub fn from_id(id: DbId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for FieldTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldTypeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown field type '{s}'")))
    }
}

impl TryFrom<String> for FieldTypeKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldTypeKind> for DbId {
    fn from(value: FieldTypeKind) -> Self {
        value.id()
    }
}
