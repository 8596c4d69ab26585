use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::{BlogTitle, CategoryId};

/// Raw "new post" form. The category select posts no value when nothing is
/// chosen, and the submit button carries the draft/publish action.
#[derive(Deserialize)]
pub struct AddBlogForm {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category_id: Option<i32>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddBlogFormPayload {
    pub title: BlogTitle,
    pub content: String,
    pub category_id: CategoryId,
    pub publish: bool,
}

#[derive(Debug, Error)]
pub enum AddBlogFormError {
    #[error("Please enter a blog title")]
    MissingTitle,
    #[error("Please select a category")]
    MissingCategory,
}

fn parse_category_id(value: Option<i32>) -> Option<CategoryId> {
    value.and_then(|id| CategoryId::new(id).ok())
}

fn is_publish(action: Option<&str>) -> bool {
    action.is_some_and(|a| a.eq_ignore_ascii_case("publish"))
}

impl TryFrom<AddBlogForm> for AddBlogFormPayload {
    type Error = AddBlogFormError;

    fn try_from(value: AddBlogForm) -> Result<Self, Self::Error> {
        let title = BlogTitle::new(value.title).map_err(|_| AddBlogFormError::MissingTitle)?;
        let category_id =
            parse_category_id(value.category_id).ok_or(AddBlogFormError::MissingCategory)?;

        Ok(Self {
            title,
            content: value.content,
            category_id,
            publish: is_publish(value.action.as_deref()),
        })
    }
}

/// Raw "edit post" form, identical fields to [`AddBlogForm`].
#[derive(Deserialize)]
pub struct EditBlogForm {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category_id: Option<i32>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditBlogFormPayload {
    pub title: BlogTitle,
    pub content: String,
    pub category_id: CategoryId,
    pub publish: bool,
}

#[derive(Debug, Error)]
pub enum EditBlogFormError {
    #[error("Please enter a blog title")]
    MissingTitle,
    #[error("Please select a category")]
    MissingCategory,
}

impl TryFrom<EditBlogForm> for EditBlogFormPayload {
    type Error = EditBlogFormError;

    fn try_from(value: EditBlogForm) -> Result<Self, Self::Error> {
        let title = BlogTitle::new(value.title).map_err(|_| EditBlogFormError::MissingTitle)?;
        let category_id =
            parse_category_id(value.category_id).ok_or(EditBlogFormError::MissingCategory)?;

        Ok(Self {
            title,
            content: value.content,
            category_id,
            publish: is_publish(value.action.as_deref()),
        })
    }
}

/// Image upload posted by the post editor.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "5MB")]
    pub image: TempFile,
}
