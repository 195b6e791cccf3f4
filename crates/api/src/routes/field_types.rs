use axum::routing::get;
use axum::Router;

use crate::handlers::field_types;
use crate::state::AppState;

/// Routes mounted at `/fieldtypes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(field_types::list_field_types))
}
