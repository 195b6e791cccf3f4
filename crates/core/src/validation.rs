//! Validation helpers shared by every command handler.
//!
//! Length limits live on the command structs and mirror the column widths in
//! the migrations; the checks here cover what `validator` does not.

use validator::ValidationErrors;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Reject empty or whitespace-only text.
pub fn require_text(label: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    Ok(())
}

/// Reject identifiers that cannot name a persisted row.
pub fn require_positive_id(label: &str, id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "{label} must be greater than 0"
        )));
    }
    Ok(())
}

/// Flatten `validator` errors into a single [`CoreError::Validation`].
///
/// Messages are sorted so the result is stable regardless of hash order.
pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
        })
        .collect();
    messages.sort();
    CoreError::Validation(messages.join("; "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
