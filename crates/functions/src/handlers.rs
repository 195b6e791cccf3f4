//! String-returning function handlers.

use std::sync::Arc;

use serde::Serialize;
use valkyrie_app::commands::{
    CreateCategoryCommand, CreateFieldCommand, DeleteFieldCommand, GetAllCategoriesQuery,
    GetAllFieldTypesQuery, GetAllFieldsQuery, GetFieldByIdQuery, UpdateFieldCommand,
};
use valkyrie_app::{Dispatcher, Operation, Request, Response, ServiceError};
use valkyrie_core::error::CoreError;

use crate::request::FieldRequest;

pub const FIELD_NOT_FOUND: &str = "Field not found";
pub const FIELD_DELETED: &str = "Field deleted successfully";

/// Function handlers sharing one dispatcher.
#[derive(Clone)]
pub struct FunctionHandlers {
    dispatcher: Arc<Dispatcher>,
}

impl FunctionHandlers {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    // -----------------------------------------------------------------------
    // Multiplexed field function
    // -----------------------------------------------------------------------

    /// Run the field operation named by `request.operation`.
    pub async fn field(&self, request: &FieldRequest) -> String {
        tracing::info!(
            operation = request.operation.as_deref().unwrap_or(""),
            id = ?request.id,
            "Processing field request"
        );

        let operation = match request
            .operation
            .as_deref()
            .unwrap_or_default()
            .parse::<Operation>()
        {
            Ok(operation) => operation,
            Err(err) => return err.to_string(),
        };

        let id = match (operation, request.id) {
            (Operation::Create | Operation::GetAll, _) => 0,
            (_, Some(id)) => id,
            (_, None) => return format!("ID is required for {operation} operation"),
        };

        match operation {
            Operation::Create => {
                self.run(Request::CreateField(request.to_create_command()))
                    .await
            }
            Operation::Get => self.get_field(GetFieldByIdQuery { id }).await,
            Operation::GetAll => self.get_fields().await,
            Operation::Update => {
                self.run(Request::UpdateField(request.to_update_command(id)))
                    .await
            }
            Operation::Delete => self.delete_field(DeleteFieldCommand { id }).await,
        }
    }

    // -----------------------------------------------------------------------
    // Single-operation functions
    // -----------------------------------------------------------------------

    pub async fn create_field(&self, cmd: CreateFieldCommand) -> String {
        tracing::info!(name = %cmd.name, "Creating field");
        self.run(Request::CreateField(cmd)).await
    }

    /// Serialized field, or [`FIELD_NOT_FOUND`].
    pub async fn get_field(&self, query: GetFieldByIdQuery) -> String {
        tracing::info!(field_id = query.id, "Getting field");
        match self.dispatcher.dispatch(Request::GetFieldById(query)).await {
            Ok(Response::MaybeField(None)) => {
                tracing::warn!(field_id = query.id, "Field not found");
                FIELD_NOT_FOUND.to_string()
            }
            Ok(response) => to_json(&response),
            Err(err) => render_error(err),
        }
    }

    pub async fn get_fields(&self) -> String {
        self.run(Request::GetAllFields(GetAllFieldsQuery)).await
    }

    pub async fn update_field(&self, cmd: UpdateFieldCommand) -> String {
        tracing::info!(field_id = cmd.id, "Updating field");
        self.run(Request::UpdateField(cmd)).await
    }

    /// [`FIELD_DELETED`] on success.
    pub async fn delete_field(&self, cmd: DeleteFieldCommand) -> String {
        match self.dispatcher.dispatch(Request::DeleteField(cmd)).await {
            Ok(_) => {
                tracing::info!(field_id = cmd.id, "Deleted field");
                FIELD_DELETED.to_string()
            }
            Err(err) => render_error(err),
        }
    }

    pub async fn create_category(&self, cmd: CreateCategoryCommand) -> String {
        tracing::info!(name = %cmd.name, "Creating category");
        self.run(Request::CreateCategory(cmd)).await
    }

    pub async fn get_categories(&self) -> String {
        self.run(Request::GetAllCategories(GetAllCategoriesQuery)).await
    }

    pub async fn get_field_types(&self) -> String {
        self.run(Request::GetAllFieldTypes(GetAllFieldTypesQuery)).await
    }

    async fn run(&self, request: Request) -> String {
        match self.dispatcher.dispatch(request).await {
            Ok(response) => to_json(&response),
            Err(err) => render_error(err),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to serialize response");
        format!("Error: {err}")
    })
}

/// Render a handler failure as the function's error string.
///
/// Validation failures and domain rule violations keep their message;
/// anything else is reported generically.
pub fn render_error(err: ServiceError) -> String {
    match err {
        ServiceError::Core(CoreError::Validation(msg)) => {
            tracing::warn!(error = %msg, "Validation error");
            format!("Validation error: {msg}")
        }
        ServiceError::Core(CoreError::NotFound { entity, id }) => {
            tracing::warn!(entity, id, "Entity not found");
            format!("Business logic error: {entity} with ID {id} not found")
        }
        ServiceError::Core(core @ (CoreError::Referenced { .. } | CoreError::Conflict(_))) => {
            tracing::warn!(error = %core, "Business logic error");
            format!("Business logic error: {core}")
        }
        other => {
            tracing::error!(error = %other, "Error processing request");
            format!("Error: {other}")
        }
    }
}
