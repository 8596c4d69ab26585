use serde::Serialize;

use crate::services::blog::PostWithCategory;

/// Template view of a blog post joined with its category name.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category_id: i32,
    pub category_name: String,
    pub published: bool,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostWithCategory> for BlogPostDto {
    fn from(value: PostWithCategory) -> Self {
        let blog = value.blog;
        Self {
            id: blog.id.get(),
            title: blog.title.into_inner(),
            content: blog.content,
            category_id: blog.category_id.get(),
            category_name: value.category_name,
            published: blog.published,
            status: if blog.published { "Published" } else { "Draft" },
            created_at: blog.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: blog.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
