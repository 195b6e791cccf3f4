//! Audit identity stamped onto created and modified rows.

use crate::types::Timestamp;

/// Identity recorded in `created_by` / `modified_by`.
///
/// There is no caller identity propagation; every write is attributed to
/// this fixed label.
pub const SYSTEM_ACTOR: &str = "System";

/// Current server time used for audit stamps.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
