use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::submission::Submission;
use crate::domain::types::{BlogId, CategoryId, FormType, SubmissionId, UserEmail};
use crate::domain::user::{NewUser, User};

pub mod blog;
pub mod category;
pub mod errors;
pub mod submission;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the four intake tables.
pub trait SubmissionReader {
    /// Load every submission, optionally restricted to one form family.
    fn list_submissions(&self, form_type: Option<FormType>) -> RepositoryResult<Vec<Submission>>;
    /// Retrieve a single submission by table and identifier.
    fn get_submission(
        &self,
        form_type: FormType,
        id: SubmissionId,
    ) -> RepositoryResult<Option<Submission>>;
}

/// Write operations over the four intake tables.
pub trait SubmissionWriter {
    /// Mark a submission approved, stamping `updated_at`.
    fn approve_submission(
        &self,
        form_type: FormType,
        id: SubmissionId,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for blog posts.
pub trait BlogReader {
    /// List all posts, newest first.
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>>;
    /// Retrieve a post by its identifier.
    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
}

/// Write operations for blog posts.
pub trait BlogWriter {
    /// Persist a new post and return it with its assigned id.
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog>;
    /// Apply an edit to an existing post.
    fn update_blog(&self, id: BlogId, update: &UpdateBlog) -> RepositoryResult<usize>;
    /// Flip a post to published.
    fn publish_blog(&self, id: BlogId, updated_at: NaiveDateTime) -> RepositoryResult<usize>;
    /// Remove a post.
    fn delete_blog(&self, id: BlogId) -> RepositoryResult<usize>;
}

/// Read-only operations for blog categories.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for blog categories.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<usize>;
}

/// Read-only operations for console user accounts.
pub trait UserReader {
    /// Look up a user by email for sign-in.
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
}

/// Write operations for console user accounts.
pub trait UserWriter {
    /// Persist a new user account.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<usize>;
}
