//! Closed request → handler dispatch.
//!
//! The operation set is fixed, so dispatch is a single `match`: one attempt,
//! no queueing, no retry.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::commands::{
    CreateCategoryCommand, CreateFieldCommand, DeleteCategoryCommand, DeleteFieldCommand,
    GetAllCategoriesQuery, GetAllFieldTypesQuery, GetAllFieldsQuery, GetFieldByIdQuery,
    UpdateCategoryCommand, UpdateFieldCommand,
};
use crate::dto::{CategoryDto, FieldDto, FieldTypeDto};
use crate::error::ServiceResult;
use crate::handlers::{CategoryHandlers, FieldHandlers, FieldTypeHandlers};
use crate::services::Repositories;

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

/// Every operation the core accepts.
#[derive(Debug, Clone)]
pub enum Request {
    CreateField(CreateFieldCommand),
    UpdateField(UpdateFieldCommand),
    DeleteField(DeleteFieldCommand),
    GetFieldById(GetFieldByIdQuery),
    GetAllFields(GetAllFieldsQuery),
    CreateCategory(CreateCategoryCommand),
    UpdateCategory(UpdateCategoryCommand),
    DeleteCategory(DeleteCategoryCommand),
    GetAllCategories(GetAllCategoriesQuery),
    GetAllFieldTypes(GetAllFieldTypesQuery),
}

impl Request {
    /// Operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::CreateField(_) => "CreateField",
            Request::UpdateField(_) => "UpdateField",
            Request::DeleteField(_) => "DeleteField",
            Request::GetFieldById(_) => "GetFieldById",
            Request::GetAllFields(_) => "GetAllFields",
            Request::CreateCategory(_) => "CreateCategory",
            Request::UpdateCategory(_) => "UpdateCategory",
            Request::DeleteCategory(_) => "DeleteCategory",
            Request::GetAllCategories(_) => "GetAllCategories",
            Request::GetAllFieldTypes(_) => "GetAllFieldTypes",
        }
    }
}

/// Result payload of a dispatched request.
///
/// Serializes as the bare payload (`null` for [`Response::Deleted`] and for
/// an absent field).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Field(FieldDto),
    MaybeField(Option<FieldDto>),
    Fields(Vec<FieldDto>),
    Category(CategoryDto),
    Categories(Vec<CategoryDto>),
    FieldTypes(Vec<FieldTypeDto>),
    Deleted,
}

// ---------------------------------------------------------------------------
// Operation tag
// ---------------------------------------------------------------------------

/// Operation discriminator carried by multiplexed entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
}

/// The operation tag did not name a known operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid operation. Use 'create', 'get', 'getall', 'update', or 'delete'")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::GetAll => "getall",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "get" => Ok(Operation::Get),
            "getall" => Ok(Operation::GetAll),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes each [`Request`] to its single handler.
pub struct Dispatcher {
    fields: FieldHandlers,
    categories: CategoryHandlers,
    field_types: FieldTypeHandlers,
}

impl Dispatcher {
    /// Build every handler from one set of repositories.
    pub fn new(repos: &Repositories) -> Self {
        Self {
            fields: FieldHandlers::new(
                repos.fields.clone(),
                repos.categories.clone(),
                repos.field_types.clone(),
            ),
            categories: CategoryHandlers::new(repos.categories.clone()),
            field_types: FieldTypeHandlers::new(repos.field_types.clone()),
        }
    }

    pub fn fields(&self) -> &FieldHandlers {
        &self.fields
    }

    pub fn categories(&self) -> &CategoryHandlers {
        &self.categories
    }

    pub fn field_types(&self) -> &FieldTypeHandlers {
        &self.field_types
    }

    /// Invoke the handler registered for `request`.
    pub async fn dispatch(&self, request: Request) -> ServiceResult<Response> {
        let operation = request.name();
        tracing::debug!(operation, "Dispatching request");

        let result = match request {
            Request::CreateField(cmd) => self.fields.create(&cmd).await.map(Response::Field),
            Request::UpdateField(cmd) => self.fields.update(&cmd).await.map(Response::Field),
            Request::DeleteField(cmd) => self.fields.delete(&cmd).await.map(|()| Response::Deleted),
            Request::GetFieldById(query) => {
                self.fields.get_by_id(&query).await.map(Response::MaybeField)
            }
            Request::GetAllFields(query) => self.fields.get_all(&query).await.map(Response::Fields),
            Request::CreateCategory(cmd) => {
                self.categories.create(&cmd).await.map(Response::Category)
            }
            Request::UpdateCategory(cmd) => {
                self.categories.update(&cmd).await.map(Response::Category)
            }
            Request::DeleteCategory(cmd) => {
                self.categories.delete(&cmd).await.map(|()| Response::Deleted)
            }
            Request::GetAllCategories(query) => {
                self.categories.get_all(&query).await.map(Response::Categories)
            }
            Request::GetAllFieldTypes(query) => {
                self.field_types.get_all(&query).await.map(Response::FieldTypes)
            }
        };

        if let Err(err) = &result {
            tracing::debug!(operation, error = %err, "Request failed");
        }
        result
    }
}
