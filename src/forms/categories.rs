use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::CategoryName;

/// Raw "new category" form.
#[derive(Deserialize)]
pub struct AddCategoryForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Category name is required")]
    MissingName,
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        let name = CategoryName::new(value.name).map_err(|_| AddCategoryFormError::MissingName)?;
        Ok(Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_form_trims_name() {
        let form = AddCategoryForm {
            name: "  Announcements  ".to_string(),
        };

        let payload: AddCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Announcements");
    }

    #[test]
    fn whitespace_only_name_is_rejected_with_friendly_message() {
        let form = AddCategoryForm {
            name: "   ".to_string(),
        };

        let err = AddCategoryFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "Category name is required");
    }
}
