//! Blog post management: listing, authoring, editing, publishing, and the
//! inline image upload used by the post editor.

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::types::{BlogId, CategoryId, StorageBucket};
use crate::forms::blog::{AddBlogFormPayload, EditBlogFormPayload};
use crate::notify::{ChangeBus, ChangeEvent, ChangeKind};
use crate::repository::{BlogReader, BlogWriter, CategoryReader};
use crate::storage::FileStorage;

use super::{ServiceError, ServiceResult};

/// A post joined with its category name for the list and detail pages.
#[derive(Debug, Clone)]
pub struct PostWithCategory {
    pub blog: Blog,
    pub category_name: String,
}

fn category_names<R>(repo: &R) -> ServiceResult<HashMap<CategoryId, String>>
where
    R: CategoryReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    Ok(categories
        .into_iter()
        .map(|c| (c.id, c.name.into_inner()))
        .collect())
}

fn with_category_name(blog: Blog, names: &HashMap<CategoryId, String>) -> PostWithCategory {
    let category_name = names
        .get(&blog.category_id)
        .cloned()
        .unwrap_or_else(|| "Uncategorized".to_string());
    PostWithCategory {
        blog,
        category_name,
    }
}

/// All posts, newest first, each carrying its category name.
pub fn show_posts<R>(repo: &R) -> ServiceResult<Vec<PostWithCategory>>
where
    R: BlogReader + CategoryReader,
{
    let names = category_names(repo)?;
    let blogs = repo.list_blogs().map_err(|e| {
        log::error!("Failed to list blog posts: {e}");
        ServiceError::Internal
    })?;
    Ok(blogs
        .into_iter()
        .map(|blog| with_category_name(blog, &names))
        .collect())
}

/// A single post for the detail and edit pages.
pub fn show_post<R>(id: BlogId, repo: &R) -> ServiceResult<PostWithCategory>
where
    R: BlogReader + CategoryReader,
{
    let blog = match repo.get_blog_by_id(id) {
        Ok(Some(blog)) => blog,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load blog post: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let names = category_names(repo)?;
    Ok(with_category_name(blog, &names))
}

fn ensure_category_exists<R>(category_id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to look up category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a post, either as a draft or published immediately.
pub fn add_post<R>(payload: AddBlogFormPayload, repo: &R, bus: &ChangeBus) -> ServiceResult<Blog>
where
    R: BlogWriter + CategoryReader,
{
    ensure_category_exists(payload.category_id, repo)?;

    let now = Utc::now().naive_utc();
    let new_blog = NewBlog {
        title: payload.title,
        content: payload.content,
        category_id: payload.category_id,
        published: payload.publish,
        created_at: now,
        updated_at: now,
    };
    let blog = repo.create_blog(&new_blog).map_err(|e| {
        log::error!("Failed to create blog post: {e}");
        ServiceError::Internal
    })?;

    bus.emit(ChangeEvent {
        table: "blogs",
        kind: ChangeKind::Insert,
    });
    Ok(blog)
}

/// Apply an edit to an existing post.
pub fn update_post<R>(
    id: BlogId,
    payload: EditBlogFormPayload,
    repo: &R,
    bus: &ChangeBus,
) -> ServiceResult<()>
where
    R: BlogWriter + CategoryReader,
{
    ensure_category_exists(payload.category_id, repo)?;

    let update = UpdateBlog {
        title: payload.title,
        content: payload.content,
        category_id: payload.category_id,
        published: payload.publish,
        updated_at: Utc::now().naive_utc(),
    };
    match repo.update_blog(id, &update) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update blog post: {e}");
            return Err(ServiceError::Internal);
        }
    }

    bus.emit(ChangeEvent {
        table: "blogs",
        kind: ChangeKind::Update,
    });
    Ok(())
}

/// Flip a draft to published.
pub fn publish_post<R>(id: BlogId, repo: &R, bus: &ChangeBus) -> ServiceResult<()>
where
    R: BlogWriter,
{
    match repo.publish_blog(id, Utc::now().naive_utc()) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to publish blog post: {e}");
            return Err(ServiceError::Internal);
        }
    }

    bus.emit(ChangeEvent {
        table: "blogs",
        kind: ChangeKind::Update,
    });
    Ok(())
}

/// Remove a post entirely.
pub fn delete_post<R>(id: BlogId, repo: &R, bus: &ChangeBus) -> ServiceResult<()>
where
    R: BlogWriter,
{
    match repo.delete_blog(id) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to delete blog post: {e}");
            return Err(ServiceError::Internal);
        }
    }

    bus.emit(ChangeEvent {
        table: "blogs",
        kind: ChangeKind::Delete,
    });
    Ok(())
}

/// Store an editor image upload and return its public URL.
pub fn upload_image(
    storage: &FileStorage,
    file_name: &str,
    bytes: &[u8],
) -> ServiceResult<String> {
    storage
        .upload(StorageBucket::Uploads, file_name, bytes)
        .map_err(|e| {
            log::error!("Failed to store uploaded image: {e}");
            ServiceError::Internal
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::types::{BlogTitle, CategoryName};
    use crate::repository::test::TestRepository;
    use chrono::NaiveDate;

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn add_payload(category_id: i32, publish: bool) -> AddBlogFormPayload {
        AddBlogFormPayload {
            title: BlogTitle::new("Passport fees update").unwrap(),
            content: "Fees change on July 1.".to_string(),
            category_id: CategoryId::new(category_id).unwrap(),
            publish,
        }
    }

    #[test]
    fn add_post_persists_and_reports_insert() {
        let repo = TestRepository::with_categories(vec![sample_category(1, "Announcements")]);
        let bus = ChangeBus::new();
        let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = events.clone();
        let _handle = bus.subscribe(move |event| {
            seen.lock().unwrap().push((event.table, event.kind));
        });

        let blog = add_post(add_payload(1, true), &repo, &bus).unwrap();

        assert!(blog.published);
        assert_eq!(blog.title.as_str(), "Passport fees update");
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[("blogs", ChangeKind::Insert)]
        );
    }

    #[test]
    fn add_post_rejects_unknown_category() {
        let repo = TestRepository::new();
        let bus = ChangeBus::new();

        assert_eq!(
            add_post(add_payload(7, false), &repo, &bus).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn posts_carry_their_category_names() {
        let repo = TestRepository::with_categories(vec![sample_category(1, "Announcements")]);
        let bus = ChangeBus::new();
        add_post(add_payload(1, false), &repo, &bus).unwrap();

        let posts = show_posts(&repo).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].category_name, "Announcements");
        assert!(!posts[0].blog.published);
    }

    #[test]
    fn publish_flips_a_draft() {
        let repo = TestRepository::with_categories(vec![sample_category(1, "Announcements")]);
        let bus = ChangeBus::new();
        let blog = add_post(add_payload(1, false), &repo, &bus).unwrap();

        publish_post(blog.id, &repo, &bus).unwrap();
        let post = show_post(blog.id, &repo).unwrap();
        assert!(post.blog.published);
    }

    #[test]
    fn operations_on_missing_posts_are_not_found() {
        let repo = TestRepository::with_categories(vec![sample_category(1, "Announcements")]);
        let bus = ChangeBus::new();
        let id = BlogId::new(42).unwrap();

        assert_eq!(show_post(id, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(
            publish_post(id, &repo, &bus).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            delete_post(id, &repo, &bus).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
