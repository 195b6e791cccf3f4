use axum::extract::State;
use axum::Json;
use valkyrie_app::commands::GetAllFieldTypesQuery;
use valkyrie_app::dto::FieldTypeDto;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /fieldtypes
pub async fn list_field_types(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FieldTypeDto>>> {
    let field_types = state
        .dispatcher
        .field_types()
        .get_all(&GetAllFieldTypesQuery)
        .await?;
    Ok(Json(field_types))
}
