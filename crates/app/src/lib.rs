//! Command/query handlers for the field bank.
//!
//! Transport adapters build a typed [`dispatch::Request`], hand it to the
//! [`dispatch::Dispatcher`], and serialize whatever [`dispatch::Response`]
//! comes back. Handlers validate input, resolve references, call the
//! repositories, and map entities to transfer objects.

pub mod commands;
pub mod dispatch;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod services;

pub use dispatch::{Dispatcher, Operation, Request, Response};
pub use error::{ServiceError, ServiceResult};
pub use services::Repositories;
