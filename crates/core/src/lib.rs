//! Shared domain primitives for the Valkyrie field bank.
//!
//! Holds the types, error taxonomy, closed field-type enumeration, input
//! limits, and the optional TTL cache. Nothing in this crate touches the
//! database.

pub mod audit;
pub mod cache;
pub mod error;
pub mod field_type;
pub mod types;
pub mod validation;
