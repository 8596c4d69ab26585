//! Email/password sign-in against the `users` table.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::auth::AuthenticatedUser;
use crate::forms::auth::SigninFormPayload;
use crate::repository::UserReader;

use super::{ServiceError, ServiceResult};

/// Hash a plaintext password into PHC string form for storage.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {e}");
            ServiceError::Internal
        })
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

/// Validate credentials and return the identity to store in the session.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
pub fn signin<R>(payload: SigninFormPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let user = match repo.get_user_by_email(&payload.email) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ServiceError::Unauthorized),
        Err(e) => {
            log::error!("Failed to look up user: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !verify_password(&user.password_hash, &payload.password) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(AuthenticatedUser {
        id: user.id.get(),
        email: user.email.into_inner(),
        name: user.name.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{UserEmail, UserId, UserName};
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_user(password: &str) -> User {
        User {
            id: UserId::new(1).unwrap(),
            email: UserEmail::new("clerk@cct.gov.gh").unwrap(),
            name: UserName::new("Registry Clerk").unwrap(),
            password_hash: hash_password(password).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn signin_succeeds_with_valid_credentials() {
        let repo = TestRepository::with_users(vec![sample_user("hunter2")]);
        let payload = SigninFormPayload {
            email: UserEmail::new("clerk@cct.gov.gh").unwrap(),
            password: "hunter2".to_string(),
        };

        let user = signin(payload, &repo).unwrap();
        assert_eq!(user.email, "clerk@cct.gov.gh");
        assert_eq!(user.name, "Registry Clerk");
    }

    #[test]
    fn signin_rejects_wrong_password() {
        let repo = TestRepository::with_users(vec![sample_user("hunter2")]);
        let payload = SigninFormPayload {
            email: UserEmail::new("clerk@cct.gov.gh").unwrap(),
            password: "wrong".to_string(),
        };

        assert_eq!(signin(payload, &repo).unwrap_err(), ServiceError::Unauthorized);
    }

    #[test]
    fn signin_rejects_unknown_email() {
        let repo = TestRepository::with_users(vec![]);
        let payload = SigninFormPayload {
            email: UserEmail::new("nobody@cct.gov.gh").unwrap(),
            password: "hunter2".to_string(),
        };

        assert_eq!(signin(payload, &repo).unwrap_err(), ServiceError::Unauthorized);
    }
}
