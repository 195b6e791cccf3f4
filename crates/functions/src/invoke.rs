//! Name-based routing of one JSON event to one function.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::handlers::FunctionHandlers;

/// Every function this crate exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    Field,
    CreateField,
    GetField,
    GetFields,
    UpdateField,
    DeleteField,
    CreateCategory,
    GetCategories,
    GetFieldTypes,
    Authorizer,
}

impl FunctionName {
    pub const ALL: [FunctionName; 10] = [
        FunctionName::Field,
        FunctionName::CreateField,
        FunctionName::GetField,
        FunctionName::GetFields,
        FunctionName::UpdateField,
        FunctionName::DeleteField,
        FunctionName::CreateCategory,
        FunctionName::GetCategories,
        FunctionName::GetFieldTypes,
        FunctionName::Authorizer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FunctionName::Field => "field",
            FunctionName::CreateField => "create-field",
            FunctionName::GetField => "get-field",
            FunctionName::GetFields => "get-fields",
            FunctionName::UpdateField => "update-field",
            FunctionName::DeleteField => "delete-field",
            FunctionName::CreateCategory => "create-category",
            FunctionName::GetCategories => "get-categories",
            FunctionName::GetFieldTypes => "get-field-types",
            FunctionName::Authorizer => "authorizer",
        }
    }

    /// Whether the function needs the database.
    pub fn needs_database(self) -> bool {
        self != FunctionName::Authorizer
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = InvokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| InvokeError::UnknownFunction(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    #[error("Function '{0}' is not served by the field handlers")]
    NotAHandler(FunctionName),
}

/// Run one dispatcher-backed function on `event`.
///
/// Functions without input ignore the event.
pub async fn invoke(
    handlers: &FunctionHandlers,
    name: FunctionName,
    event: Value,
) -> Result<String, InvokeError> {
    tracing::debug!(function = %name, "Invoking function");

    let output = match name {
        FunctionName::Field => handlers.field(&parse(event)?).await,
        FunctionName::CreateField => handlers.create_field(parse(event)?).await,
        FunctionName::GetField => handlers.get_field(parse(event)?).await,
        FunctionName::GetFields => handlers.get_fields().await,
        FunctionName::UpdateField => handlers.update_field(parse(event)?).await,
        FunctionName::DeleteField => handlers.delete_field(parse(event)?).await,
        FunctionName::CreateCategory => handlers.create_category(parse(event)?).await,
        FunctionName::GetCategories => handlers.get_categories().await,
        FunctionName::GetFieldTypes => handlers.get_field_types().await,
        FunctionName::Authorizer => return Err(InvokeError::NotAHandler(name)),
    };
    Ok(output)
}

fn parse<T: DeserializeOwned>(event: Value) -> Result<T, InvokeError> {
    Ok(serde_json::from_value(event)?)
}
