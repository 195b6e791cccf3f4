//! Explicit entity → transfer-object conversions.

use valkyrie_db::models::category::Category;
use valkyrie_db::models::field::FieldDetail;
use valkyrie_db::models::field_type::FieldType;

use crate::dto::{CategoryDto, FieldDto, FieldTypeDto};

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            rank: category.rank,
            created_date: category.created_date,
            modified_date: category.modified_date,
            created_by: category.created_by.clone(),
            modified_by: category.modified_by.clone(),
        }
    }
}

impl From<&FieldType> for FieldTypeDto {
    fn from(field_type: &FieldType) -> Self {
        Self {
            field_type_id: field_type.id,
            field_type: field_type.field_type.as_str().to_string(),
            structure: Some(field_type.structure.clone()),
        }
    }
}

impl From<&FieldDetail> for FieldDto {
    fn from(detail: &FieldDetail) -> Self {
        let field = &detail.field;
        Self {
            field_id: field.id,
            name: field.name.clone(),
            label: field.label.clone(),
            description: field.description.clone(),
            created_date: field.created_date,
            modified_date: field.modified_date,
            created_by: field.created_by.clone(),
            modified_by: field.modified_by.clone(),
            category_id: field.category_id,
            category: Some(CategoryDto::from(&detail.category)),
            field_type_id: field.field_type_id,
            field_type: Some(FieldTypeDto::from(&detail.field_type)),
        }
    }
}

/// Map a slice of entities with the matching `From<&T>` conversion.
pub fn map_all<'a, T: 'a, D>(items: impl IntoIterator<Item = &'a T>) -> Vec<D>
where
    D: From<&'a T>,
{
    items.into_iter().map(D::from).collect()
}
