//! Function-style entry points over the Valkyrie handlers.
//!
//! Each function takes one JSON event and answers with a string: the
//! serialized result on success, or a prefixed error message.

pub mod authorizer;
pub mod config;
pub mod handlers;
pub mod invoke;
pub mod request;
