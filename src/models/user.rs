use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserEmail, UserName};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel model representing the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`User`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            email: UserEmail::new(user.email)?,
            name: UserName::new(user.name)?,
            password_hash: user.password_hash,
            created_at: user.created_at,
        })
    }
}

impl From<DomainNewUser> for NewUser {
    fn from(user: DomainNewUser) -> Self {
        Self {
            email: user.email.into_inner(),
            name: user.name.into_inner(),
            password_hash: user.password_hash,
            created_at: user.created_at,
        }
    }
}
