//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use valkyrie_app::commands::{
    CreateCategoryCommand, DeleteCategoryCommand, GetAllCategoriesQuery, UpdateCategoryCommand,
};
use valkyrie_app::dto::CategoryDto;
use valkyrie_core::types::DbId;

use super::location;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = state
        .dispatcher
        .categories()
        .get_all(&GetAllCategoriesQuery)
        .await?;
    Ok(Json(categories))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(cmd): Json<CreateCategoryCommand>,
) -> AppResult<impl IntoResponse> {
    let category = state.dispatcher.categories().create(&cmd).await?;
    let headers = location(format!("/categories/{}", category.category_id))?;
    Ok((StatusCode::CREATED, headers, Json(category)))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut cmd): Json<UpdateCategoryCommand>,
) -> AppResult<Json<CategoryDto>> {
    cmd.id = id;
    let category = state.dispatcher.categories().update(&cmd).await?;
    Ok(Json(category))
}

/// DELETE /categories/{id}
///
/// 409 while any field still references the category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .dispatcher
        .categories()
        .delete(&DeleteCategoryCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
