pub mod categories;
pub mod field_types;
pub mod fields;

use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue};

use crate::error::{AppError, AppResult};

/// `Location` header for a newly created resource.
fn location(path: String) -> AppResult<HeaderMap> {
    let value = HeaderValue::try_from(path)
        .map_err(|e| AppError::InternalError(format!("Invalid Location header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, value);
    Ok(headers)
}
