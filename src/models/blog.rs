use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{
    Blog as DomainBlog, NewBlog as DomainNewBlog, UpdateBlog as DomainUpdateBlog,
};
use crate::domain::types::{BlogTitle, TypeConstraintError};

/// Diesel model representing the `blogs` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category_id: i32,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Blog`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub category_id: i32,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied when editing a blog post.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::blogs)]
pub struct UpdateBlog {
    pub title: String,
    pub content: String,
    pub category_id: i32,
    pub published: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Blog> for DomainBlog {
    type Error = TypeConstraintError;

    fn try_from(blog: Blog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: blog.id.try_into()?,
            title: BlogTitle::new(blog.title)?,
            content: blog.content,
            category_id: blog.category_id.try_into()?,
            published: blog.published,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        })
    }
}

impl From<DomainNewBlog> for NewBlog {
    fn from(blog: DomainNewBlog) -> Self {
        Self {
            title: blog.title.into_inner(),
            content: blog.content,
            category_id: blog.category_id.get(),
            published: blog.published,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<DomainUpdateBlog> for UpdateBlog {
    fn from(blog: DomainUpdateBlog) -> Self {
        Self {
            title: blog.title.into_inner(),
            content: blog.content,
            category_id: blog.category_id.get(),
            published: blog.published,
            updated_at: blog.updated_at,
        }
    }
}
