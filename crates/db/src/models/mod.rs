//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where the entity is user-mutable

pub mod category;
pub mod field;
pub mod field_type;
