pub mod categories;
pub mod fields;
pub mod field_types;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /                        greeting
/// /fields                  list, create
/// /fields/{id}             get, update, delete
/// /categories              list, create
/// /categories/{id}         update, delete
/// /fieldtypes              list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .nest("/fields", fields::router())
        .nest("/categories", categories::router())
        .nest("/fieldtypes", field_types::router())
}

/// GET / -- liveness greeting.
async fn hello() -> &'static str {
    "Hello world!"
}
