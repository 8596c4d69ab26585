use diesel::prelude::*;

use crate::domain::types::UserEmail;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user: DbNewUser = user.clone().into();

        let affected = diesel::insert_into(users::table)
            .values(db_user)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
