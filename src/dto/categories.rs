use serde::Serialize;

use crate::domain::category::Category;

/// Template view of a blog category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub created_at: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            created_at: value.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
