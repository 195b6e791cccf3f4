//! Handlers for the `/fields` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use valkyrie_app::commands::{
    CreateFieldCommand, DeleteFieldCommand, GetAllFieldsQuery, GetFieldByIdQuery,
    UpdateFieldCommand,
};
use valkyrie_app::dto::FieldDto;
use valkyrie_core::error::CoreError;
use valkyrie_core::types::DbId;

use super::location;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /fields
pub async fn list_fields(State(state): State<AppState>) -> AppResult<Json<Vec<FieldDto>>> {
    let fields = state.dispatcher.fields().get_all(&GetAllFieldsQuery).await?;
    Ok(Json(fields))
}

/// GET /fields/{id}
pub async fn get_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FieldDto>> {
    let field = state
        .dispatcher
        .fields()
        .get_by_id(&GetFieldByIdQuery { id })
        .await?
        .ok_or(CoreError::NotFound { entity: "Field", id })?;
    Ok(Json(field))
}

/// POST /fields
///
/// Returns 201 with a `Location` header pointing at the new field.
pub async fn create_field(
    State(state): State<AppState>,
    Json(cmd): Json<CreateFieldCommand>,
) -> AppResult<impl IntoResponse> {
    let field = state.dispatcher.fields().create(&cmd).await?;
    let headers = location(format!("/fields/{}", field.field_id))?;
    Ok((StatusCode::CREATED, headers, Json(field)))
}

/// PUT /fields/{id}
///
/// The path id wins over any `id` in the body.
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut cmd): Json<UpdateFieldCommand>,
) -> AppResult<Json<FieldDto>> {
    cmd.id = id;
    let field = state.dispatcher.fields().update(&cmd).await?;
    Ok(Json(field))
}

/// DELETE /fields/{id}
pub async fn delete_field(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .dispatcher
        .fields()
        .delete(&DeleteFieldCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
