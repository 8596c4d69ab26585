use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserEmail, UserId, UserName};

/// A console operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: UserEmail,
    pub name: UserName,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: UserEmail,
    pub name: UserName,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
