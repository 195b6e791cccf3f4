//! Field handler behaviour against the in-memory store.

mod common;

use assert_matches::assert_matches;
use common::{create_field_cmd, seed_category, test_dispatcher};
use valkyrie_app::commands::{
    CreateFieldCommand, DeleteFieldCommand, GetAllFieldsQuery, GetFieldByIdQuery,
    UpdateFieldCommand,
};
use valkyrie_app::ServiceError;
use valkyrie_core::error::CoreError;
use valkyrie_core::field_type::FieldTypeKind;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_field_with_relations() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "Test Category", 1).await;

    let dto = dispatcher
        .fields()
        .create(&CreateFieldCommand {
            name: "Test Field".into(),
            label: "Test Label".into(),
            description: Some("Test Description".into()),
            category_id,
            field_type_id: FieldTypeKind::Text.id(),
        })
        .await
        .unwrap();

    assert!(dto.field_id > 0);
    assert_eq!(dto.name, "Test Field");
    assert_eq!(dto.label, "Test Label");
    assert_eq!(dto.description.as_deref(), Some("Test Description"));
    assert_eq!(dto.category_id, category_id);
    assert_eq!(dto.created_by, "System");
    assert!(dto.modified_date.is_none());
    assert_eq!(dto.category.unwrap().name, "Test Category");
    assert_eq!(dto.field_type.unwrap().field_type, "Text");
}

#[tokio::test]
async fn create_with_unknown_category_persists_nothing() {
    let (_store, dispatcher) = test_dispatcher();

    let err = dispatcher
        .fields()
        .create(&create_field_cmd("Orphan", 999))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ServiceError::Core(CoreError::Validation(msg)) if msg == "Category with ID 999 does not exist"
    );
    let all = dispatcher.fields().get_all(&GetAllFieldsQuery).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn create_with_unknown_field_type_is_rejected() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;

    let mut cmd = create_field_cmd("Bad Type", category_id);
    cmd.field_type_id = 42;
    let err = dispatcher.fields().create(&cmd).await.unwrap_err();

    assert_matches!(
        err,
        ServiceError::Core(CoreError::Validation(msg)) if msg == "FieldType with ID 42 does not exist"
    );
}

#[tokio::test]
async fn create_with_blank_name_is_rejected() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;

    let mut cmd = create_field_cmd("x", category_id);
    cmd.name = "   ".into();
    let err = dispatcher.fields().create(&cmd).await.unwrap_err();

    assert_matches!(err, ServiceError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn create_with_overlong_label_is_rejected() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;

    let mut cmd = create_field_cmd("Long", category_id);
    cmd.label = "l".repeat(101);
    let err = dispatcher.fields().create(&cmd).await.unwrap_err();

    assert_matches!(
        err,
        ServiceError::Core(CoreError::Validation(msg)) if msg.contains("at most 100")
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_missing_field_is_not_found_and_changes_nothing() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;
    let existing = dispatcher
        .fields()
        .create(&create_field_cmd("Keep", category_id))
        .await
        .unwrap();

    let err = dispatcher
        .fields()
        .update(&UpdateFieldCommand {
            id: 999,
            name: "Changed".into(),
            label: "Changed".into(),
            description: None,
            category_id,
        })
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound { entity: "Field", id: 999 })
    );
    let all = dispatcher.fields().get_all(&GetAllFieldsQuery).await.unwrap();
    assert_eq!(all, vec![existing]);
}

#[tokio::test]
async fn update_preserves_creation_audit_and_stamps_modification() {
    let (_store, dispatcher) = test_dispatcher();
    let first = seed_category(&dispatcher, "First", 1).await;
    let second = seed_category(&dispatcher, "Second", 2).await;
    let created = dispatcher
        .fields()
        .create(&create_field_cmd("Original", first))
        .await
        .unwrap();

    let updated = dispatcher
        .fields()
        .update(&UpdateFieldCommand {
            id: created.field_id,
            name: "Renamed".into(),
            label: "Renamed Label".into(),
            description: Some("now described".into()),
            category_id: second,
        })
        .await
        .unwrap();

    assert_eq!(updated.field_id, created.field_id);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.category_id, second);
    assert_eq!(updated.category.unwrap().name, "Second");
    assert_eq!(updated.field_type_id, created.field_type_id);
    assert_eq!(updated.created_date, created.created_date);
    assert_eq!(updated.created_by, created.created_by);
    assert!(updated.modified_date.is_some());
    assert_eq!(updated.modified_by.as_deref(), Some("System"));
}

#[tokio::test]
async fn update_with_non_positive_category_is_rejected() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;
    let created = dispatcher
        .fields()
        .create(&create_field_cmd("Field", category_id))
        .await
        .unwrap();

    let err = dispatcher
        .fields()
        .update(&UpdateFieldCommand {
            id: created.field_id,
            name: "Field".into(),
            label: "Label".into(),
            description: None,
            category_id: 0,
        })
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ServiceError::Core(CoreError::Validation(msg)) if msg == "Category ID must be greater than 0"
    );
}

// ---------------------------------------------------------------------------
// Queries and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_all_on_empty_store_is_empty() {
    let (_store, dispatcher) = test_dispatcher();
    let all = dispatcher.fields().get_all(&GetAllFieldsQuery).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn get_all_orders_by_name() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;
    for name in ["B", "A"] {
        dispatcher
            .fields()
            .create(&create_field_cmd(name, category_id))
            .await
            .unwrap();
    }

    let names: Vec<String> = dispatcher
        .fields()
        .get_all(&GetAllFieldsQuery)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();

    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
async fn get_by_id_of_missing_field_is_none() {
    let (_store, dispatcher) = test_dispatcher();
    let found = dispatcher
        .fields()
        .get_by_id(&GetFieldByIdQuery { id: 12 })
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn delete_then_get_is_none() {
    let (_store, dispatcher) = test_dispatcher();
    let category_id = seed_category(&dispatcher, "General", 1).await;
    let created = dispatcher
        .fields()
        .create(&create_field_cmd("Doomed", category_id))
        .await
        .unwrap();

    dispatcher
        .fields()
        .delete(&DeleteFieldCommand {
            id: created.field_id,
        })
        .await
        .unwrap();

    let found = dispatcher
        .fields()
        .get_by_id(&GetFieldByIdQuery {
            id: created.field_id,
        })
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn delete_missing_field_is_not_found() {
    let (_store, dispatcher) = test_dispatcher();
    let err = dispatcher
        .fields()
        .delete(&DeleteFieldCommand { id: 5 })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::NotFound { entity: "Field", id: 5 })
    );
}
