//! One handler struct per aggregate; one method per operation.
//!
//! Each method validates its request before touching a repository, so a
//! rejected request never reaches the store.

pub mod category;
pub mod field;
pub mod field_type;

pub use category::CategoryHandlers;
pub use field::FieldHandlers;
pub use field_type::FieldTypeHandlers;
