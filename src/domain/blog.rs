use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BlogId, BlogTitle, CategoryId};

/// A blog post authored from the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: BlogTitle,
    pub content: String,
    pub category_id: CategoryId,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Blog`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBlog {
    pub title: BlogTitle,
    pub content: String,
    pub category_id: CategoryId,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields that can change when editing a [`Blog`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateBlog {
    pub title: BlogTitle,
    pub content: String,
    pub category_id: CategoryId,
    pub published: bool,
    pub updated_at: NaiveDateTime,
}
