//! Category command and query handlers.

use std::sync::Arc;

use validator::Validate;
use valkyrie_core::error::CoreError;
use valkyrie_core::validation::{into_core_error, require_positive_id, require_text};
use valkyrie_db::models::category::CreateCategory;
use valkyrie_db::repositories::CategoryRepository;

use crate::commands::{
    CreateCategoryCommand, DeleteCategoryCommand, GetAllCategoriesQuery, UpdateCategoryCommand,
};
use crate::dto::CategoryDto;
use crate::error::ServiceResult;
use crate::mapping::map_all;

pub struct CategoryHandlers {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryHandlers {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, cmd: &CreateCategoryCommand) -> ServiceResult<CategoryDto> {
        require_text("Category name", &cmd.name)?;
        cmd.validate().map_err(into_core_error)?;

        let input = CreateCategory {
            name: cmd.name.clone(),
            description: cmd.description.clone(),
            rank: cmd.rank,
        };
        let category = self.categories.create(&input).await?;

        tracing::info!(
            category_id = category.id,
            name = %category.name,
            rank = category.rank,
            "Category created"
        );

        Ok(CategoryDto::from(&category))
    }

    pub async fn update(&self, cmd: &UpdateCategoryCommand) -> ServiceResult<CategoryDto> {
        require_positive_id("Category ID", cmd.id)?;
        require_text("Category name", &cmd.name)?;
        cmd.validate().map_err(into_core_error)?;

        let mut category = self
            .categories
            .find_by_id(cmd.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Category",
                id: cmd.id,
            })?;
        category.name = cmd.name.clone();
        category.description = cmd.description.clone();
        category.rank = cmd.rank;

        let updated = self.categories.update(&category).await?;

        tracing::info!(category_id = updated.id, "Category updated");

        Ok(CategoryDto::from(&updated))
    }

    /// Delete a category that no field references.
    ///
    /// The reference check runs here so the caller gets a named error; the
    /// store enforces the same rule for concurrent writers.
    pub async fn delete(&self, cmd: &DeleteCategoryCommand) -> ServiceResult<()> {
        require_positive_id("Category ID", cmd.id)?;

        if self.categories.find_by_id(cmd.id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Category",
                id: cmd.id,
            }
            .into());
        }

        let field_count = self.categories.count_fields(cmd.id).await?;
        if field_count > 0 {
            tracing::warn!(category_id = cmd.id, field_count, "Category still has fields");
            return Err(CoreError::Referenced {
                entity: "Category",
                id: cmd.id,
            }
            .into());
        }

        self.categories.delete(cmd.id).await?;

        tracing::info!(category_id = cmd.id, "Category deleted");
        Ok(())
    }

    /// All categories ordered by rank.
    pub async fn get_all(&self, _query: &GetAllCategoriesQuery) -> ServiceResult<Vec<CategoryDto>> {
        let categories = self.categories.list().await?;
        Ok(map_all(&categories))
    }
}
