//! Function handlers end to end over the in-memory store.

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use valkyrie_app::commands::{CreateCategoryCommand, DeleteFieldCommand, GetFieldByIdQuery};
use valkyrie_app::{Dispatcher, Repositories};
use valkyrie_db::memory::InMemoryStore;
use valkyrie_functions::handlers::FunctionHandlers;
use valkyrie_functions::invoke::{invoke, FunctionName, InvokeError};
use valkyrie_functions::request::FieldRequest;

fn handlers() -> FunctionHandlers {
    let store = InMemoryStore::new();
    FunctionHandlers::new(Arc::new(Dispatcher::new(&Repositories::in_memory(&store))))
}

async fn category(handlers: &FunctionHandlers) -> i64 {
    let out = handlers
        .create_category(CreateCategoryCommand {
            name: "General".into(),
            description: None,
            rank: 1,
        })
        .await;
    serde_json::from_str::<Value>(&out).unwrap()["categoryId"]
        .as_i64()
        .unwrap()
}

fn field_request(event: Value) -> FieldRequest {
    serde_json::from_value(event).unwrap()
}

// ---------------------------------------------------------------------------
// Multiplexed field function
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_get_round_trips_through_json() {
    let handlers = handlers();
    let category_id = category(&handlers).await;

    let created = handlers
        .field(&field_request(json!({
            "operation": "create",
            "name": "Test Field",
            "label": "Test Label",
            "categoryId": category_id,
            "fieldTypeId": 4
        })))
        .await;
    let created: Value = serde_json::from_str(&created).unwrap();
    let id = created["fieldId"].as_i64().unwrap();

    let fetched = handlers
        .field(&field_request(json!({ "operation": "GET", "id": id })))
        .await;
    let fetched: Value = serde_json::from_str(&fetched).unwrap();
    assert_eq!(fetched["name"], "Test Field");
    assert_eq!(fetched["fieldType"]["type"], "Text");
}

#[tokio::test]
async fn create_without_name_uses_defaults() {
    let handlers = handlers();
    let category_id = category(&handlers).await;

    let out = handlers
        .field(&field_request(json!({
            "operation": "create",
            "categoryId": category_id,
            "fieldTypeId": 1
        })))
        .await;
    let json: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["name"], "Default Name");
    assert_eq!(json["label"], "Default Label");
}

#[tokio::test]
async fn get_of_missing_field_reports_not_found() {
    let handlers = handlers();
    let out = handlers
        .field(&field_request(json!({ "operation": "get", "id": 404 })))
        .await;
    assert_eq!(out, "Field not found");
}

#[tokio::test]
async fn operations_needing_an_id_say_so() {
    let handlers = handlers();
    for op in ["get", "update", "delete"] {
        let out = handlers
            .field(&field_request(json!({ "operation": op })))
            .await;
        assert_eq!(out, format!("ID is required for {op} operation"));
    }
}

#[tokio::test]
async fn unknown_or_missing_operation_is_invalid() {
    let handlers = handlers();
    let expected = "Invalid operation. Use 'create', 'get', 'getall', 'update', or 'delete'";

    let out = handlers
        .field(&field_request(json!({ "operation": "purge" })))
        .await;
    assert_eq!(out, expected);

    let out = handlers.field(&FieldRequest::default()).await;
    assert_eq!(out, expected);
}

#[tokio::test]
async fn create_with_unknown_category_is_a_validation_error() {
    let handlers = handlers();
    let out = handlers
        .field(&field_request(json!({
            "operation": "create",
            "name": "Orphan",
            "label": "Orphan",
            "categoryId": 99,
            "fieldTypeId": 4
        })))
        .await;
    assert_eq!(out, "Validation error: Category with ID 99 does not exist");
}

#[tokio::test]
async fn update_of_missing_field_is_a_business_error() {
    let handlers = handlers();
    let category_id = category(&handlers).await;

    let out = handlers
        .field(&field_request(json!({
            "operation": "update",
            "id": 31,
            "name": "N",
            "label": "L",
            "categoryId": category_id
        })))
        .await;
    assert_eq!(out, "Business logic error: Field with ID 31 not found");
}

#[tokio::test]
async fn delete_of_missing_field_names_the_id() {
    let handlers = handlers();

    let out = handlers
        .field(&field_request(json!({ "operation": "delete", "id": 99 })))
        .await;
    assert_eq!(out, "Business logic error: Field with ID 99 not found");
}

#[tokio::test]
async fn delete_confirms_and_getall_lists_the_rest() {
    let handlers = handlers();
    let category_id = category(&handlers).await;
    let mut ids = Vec::new();
    for name in ["B", "A"] {
        let out = handlers
            .field(&field_request(json!({
                "operation": "create",
                "name": name,
                "label": name,
                "categoryId": category_id,
                "fieldTypeId": 4
            })))
            .await;
        ids.push(serde_json::from_str::<Value>(&out).unwrap()["fieldId"].as_i64().unwrap());
    }

    let out = handlers
        .field(&field_request(json!({ "operation": "delete", "id": ids[0] })))
        .await;
    assert_eq!(out, "Field deleted successfully");

    let out = handlers
        .field(&field_request(json!({ "operation": "getall" })))
        .await;
    let all: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["name"], "A");
}

// ---------------------------------------------------------------------------
// Single-operation functions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_operation_functions_share_the_store() {
    let handlers = handlers();
    let category_id = category(&handlers).await;

    let created = invoke(
        &handlers,
        FunctionName::CreateField,
        json!({ "name": "Solo", "label": "Solo", "categoryId": category_id, "fieldTypeId": 2 }),
    )
    .await
    .unwrap();
    let id = serde_json::from_str::<Value>(&created).unwrap()["fieldId"]
        .as_i64()
        .unwrap();

    let fetched = handlers.get_field(GetFieldByIdQuery { id }).await;
    assert_eq!(serde_json::from_str::<Value>(&fetched).unwrap()["name"], "Solo");

    let categories = invoke(&handlers, FunctionName::GetCategories, Value::Null)
        .await
        .unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&categories).unwrap()[0]["name"],
        "General"
    );

    assert_eq!(
        handlers.delete_field(DeleteFieldCommand { id }).await,
        "Field deleted successfully"
    );
    assert_eq!(
        handlers.delete_field(DeleteFieldCommand { id }).await,
        format!("Business logic error: Field with ID {id} not found")
    );
}

#[tokio::test]
async fn get_field_types_returns_six_entries() {
    let handlers = handlers();
    let out = invoke(&handlers, FunctionName::GetFieldTypes, Value::Null)
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn malformed_events_are_rejected_before_dispatch() {
    let handlers = handlers();
    let err = invoke(&handlers, FunctionName::GetField, json!({ "id": "seven" }))
        .await
        .unwrap_err();
    assert_matches!(err, InvokeError::InvalidEvent(_));

    let err = invoke(&handlers, FunctionName::Authorizer, Value::Null)
        .await
        .unwrap_err();
    assert_matches!(err, InvokeError::NotAHandler(FunctionName::Authorizer));
}
