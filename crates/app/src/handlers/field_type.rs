//! Field type queries. Field types are seed data; nothing here writes.

use std::sync::Arc;

use valkyrie_db::repositories::FieldTypeRepository;

use crate::commands::GetAllFieldTypesQuery;
use crate::dto::FieldTypeDto;
use crate::error::ServiceResult;
use crate::mapping::map_all;

pub struct FieldTypeHandlers {
    field_types: Arc<dyn FieldTypeRepository>,
}

impl FieldTypeHandlers {
    pub fn new(field_types: Arc<dyn FieldTypeRepository>) -> Self {
        Self { field_types }
    }

    /// The seeded field types in id order.
    pub async fn get_all(&self, _query: &GetAllFieldTypesQuery) -> ServiceResult<Vec<FieldTypeDto>> {
        let field_types = self.field_types.list().await?;
        Ok(map_all(&field_types))
    }
}
