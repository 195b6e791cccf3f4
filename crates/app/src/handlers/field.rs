//! Field command and query handlers.

use std::sync::Arc;

use validator::Validate;
use valkyrie_core::error::CoreError;
use valkyrie_core::types::DbId;
use valkyrie_core::validation::{into_core_error, require_positive_id, require_text};
use valkyrie_db::models::category::Category;
use valkyrie_db::models::field::{CreateField, FieldDetail};
use valkyrie_db::models::field_type::FieldType;
use valkyrie_db::repositories::{CategoryRepository, FieldRepository, FieldTypeRepository};

use crate::commands::{
    CreateFieldCommand, DeleteFieldCommand, GetAllFieldsQuery, GetFieldByIdQuery,
    UpdateFieldCommand,
};
use crate::dto::FieldDto;
use crate::error::ServiceResult;
use crate::mapping::map_all;

/// Handlers for every field operation.
///
/// Holds the category and field type repositories as well, since a field
/// cannot be written without resolving both references.
pub struct FieldHandlers {
    fields: Arc<dyn FieldRepository>,
    categories: Arc<dyn CategoryRepository>,
    field_types: Arc<dyn FieldTypeRepository>,
}

impl FieldHandlers {
    pub fn new(
        fields: Arc<dyn FieldRepository>,
        categories: Arc<dyn CategoryRepository>,
        field_types: Arc<dyn FieldTypeRepository>,
    ) -> Self {
        Self {
            fields,
            categories,
            field_types,
        }
    }

    /// Create a field after checking its text and both references.
    pub async fn create(&self, cmd: &CreateFieldCommand) -> ServiceResult<FieldDto> {
        tracing::debug!(name = %cmd.name, label = %cmd.label, "Creating field");

        if let Err(err) = validate_text(&cmd.name, &cmd.label).and_then(|()| {
            cmd.validate().map_err(into_core_error)
        }) {
            tracing::warn!(error = %err, "Field creation rejected");
            return Err(err.into());
        }

        let category = self.resolve_category(cmd.category_id).await?;
        let field_type = self.resolve_field_type(cmd.field_type_id).await?;

        let input = CreateField {
            name: cmd.name.clone(),
            label: cmd.label.clone(),
            description: cmd.description.clone(),
            category_id: category.id,
            field_type_id: field_type.id,
        };
        let field = self.fields.create(&input).await?;

        tracing::info!(field_id = field.id, name = %field.name, "Field created");

        Ok(FieldDto::from(&FieldDetail {
            field,
            category,
            field_type,
        }))
    }

    /// Overwrite name, label, description, and category of an existing field.
    pub async fn update(&self, cmd: &UpdateFieldCommand) -> ServiceResult<FieldDto> {
        require_positive_id("Field ID", cmd.id)?;
        validate_text(&cmd.name, &cmd.label)?;
        cmd.validate().map_err(into_core_error)?;
        require_positive_id("Category ID", cmd.category_id)?;

        let existing = self
            .fields
            .find_by_id(cmd.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Field",
                id: cmd.id,
            })?;
        let category = self.resolve_category(cmd.category_id).await?;

        let mut field = existing.field;
        field.name = cmd.name.clone();
        field.label = cmd.label.clone();
        field.description = cmd.description.clone();
        field.category_id = category.id;

        let updated = self.fields.update(&field).await?;

        tracing::info!(field_id = updated.id, "Field updated");

        Ok(FieldDto::from(&FieldDetail {
            field: updated,
            category,
            field_type: existing.field_type,
        }))
    }

    /// Delete an existing field. Deleting a missing field is an error.
    pub async fn delete(&self, cmd: &DeleteFieldCommand) -> ServiceResult<()> {
        require_positive_id("Field ID", cmd.id)?;

        if self.fields.find_by_id(cmd.id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Field",
                id: cmd.id,
            }
            .into());
        }
        self.fields.delete(cmd.id).await?;

        tracing::info!(field_id = cmd.id, "Field deleted");
        Ok(())
    }

    /// Fetch one field. `Ok(None)` means absent, not failure.
    pub async fn get_by_id(&self, query: &GetFieldByIdQuery) -> ServiceResult<Option<FieldDto>> {
        require_positive_id("Field ID", query.id)?;

        let detail = self.fields.find_by_id(query.id).await?;
        if detail.is_none() {
            tracing::debug!(field_id = query.id, "Field not found");
        }
        Ok(detail.as_ref().map(FieldDto::from))
    }

    /// All fields ordered by name.
    pub async fn get_all(&self, _query: &GetAllFieldsQuery) -> ServiceResult<Vec<FieldDto>> {
        let fields = self.fields.list().await?;
        tracing::debug!(count = fields.len(), "Listed fields");
        Ok(map_all(&fields))
    }

    async fn resolve_category(&self, id: DbId) -> ServiceResult<Category> {
        let category = if id > 0 {
            self.categories.find_by_id(id).await?
        } else {
            None
        };
        category.ok_or_else(|| {
            CoreError::Validation(format!("Category with ID {id} does not exist")).into()
        })
    }

    async fn resolve_field_type(&self, id: DbId) -> ServiceResult<FieldType> {
        let field_type = if id > 0 {
            self.field_types.find_by_id(id).await?
        } else {
            None
        };
        field_type.ok_or_else(|| {
            CoreError::Validation(format!("FieldType with ID {id} does not exist")).into()
        })
    }
}

fn validate_text(name: &str, label: &str) -> Result<(), CoreError> {
    require_text("Field name", name)?;
    require_text("Field label", label)
}
