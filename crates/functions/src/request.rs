//! Event payload of the multiplexed `field` function.

use serde::Deserialize;
use valkyrie_app::commands::{CreateFieldCommand, UpdateFieldCommand};
use valkyrie_core::types::DbId;

const DEFAULT_NAME: &str = "Default Name";
const DEFAULT_LABEL: &str = "Default Label";

/// One field operation selected by `operation`.
///
/// Every other member is optional; which ones matter depends on the
/// operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRequest {
    pub operation: Option<String>,
    pub id: Option<DbId>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub field_type_id: Option<DbId>,
}

impl FieldRequest {
    pub fn to_create_command(&self) -> CreateFieldCommand {
        CreateFieldCommand {
            name: self.name_or_default(),
            label: self.label_or_default(),
            description: self.description.clone(),
            category_id: self.category_id.unwrap_or(0),
            field_type_id: self.field_type_id.unwrap_or(0),
        }
    }

    pub fn to_update_command(&self, id: DbId) -> UpdateFieldCommand {
        UpdateFieldCommand {
            id,
            name: self.name_or_default(),
            label: self.label_or_default(),
            description: self.description.clone(),
            category_id: self.category_id.unwrap_or(0),
        }
    }

    fn name_or_default(&self) -> String {
        self.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string())
    }

    fn label_or_default(&self) -> String {
        self.label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_members_fall_back_to_defaults() {
        let req: FieldRequest = serde_json::from_str(r#"{"operation":"create"}"#).unwrap();
        let cmd = req.to_create_command();

        assert_eq!(cmd.name, "Default Name");
        assert_eq!(cmd.label, "Default Label");
        assert_eq!(cmd.category_id, 0);
        assert_eq!(cmd.field_type_id, 0);
    }

    #[test]
    fn camel_case_members_are_read() {
        let req: FieldRequest = serde_json::from_str(
            r#"{"operation":"update","id":4,"name":"N","label":"L","categoryId":2}"#,
        )
        .unwrap();
        let cmd = req.to_update_command(4);

        assert_eq!(cmd.id, 4);
        assert_eq!(cmd.name, "N");
        assert_eq!(cmd.category_id, 2);
    }
}
