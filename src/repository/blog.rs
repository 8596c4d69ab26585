use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{Blog, NewBlog, UpdateBlog};
use crate::domain::types::BlogId;
use crate::models::blog::{Blog as DbBlog, NewBlog as DbNewBlog, UpdateBlog as DbUpdateBlog};
use crate::repository::{BlogReader, BlogWriter, DieselRepository, RepositoryResult};

impl BlogReader for DieselRepository {
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let items = blogs::table
            .order(blogs::created_at.desc())
            .load::<DbBlog>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Blog>, _>>()?;

        Ok(items)
    }

    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let blog = blogs::table
            .filter(blogs::id.eq(id.get()))
            .first::<DbBlog>(&mut conn)
            .optional()?;

        let blog = blog.map(TryInto::try_into).transpose()?;
        Ok(blog)
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let db_blog: DbNewBlog = blog.clone().into();

        let created = diesel::insert_into(blogs::table)
            .values(db_blog)
            .get_result::<DbBlog>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_blog(&self, id: BlogId, update: &UpdateBlog) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let changeset: DbUpdateBlog = update.clone().into();

        let affected = diesel::update(blogs::table.filter(blogs::id.eq(id.get())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn publish_blog(&self, id: BlogId, updated_at: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let affected = diesel::update(blogs::table.filter(blogs::id.eq(id.get())))
            .set((blogs::published.eq(true), blogs::updated_at.eq(updated_at)))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_blog(&self, id: BlogId) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(blogs::table.filter(blogs::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
