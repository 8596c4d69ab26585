use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::UserEmail;

/// Raw sign-in form as posted by the browser.
#[derive(Deserialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

/// Validated sign-in credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct SigninFormPayload {
    pub email: UserEmail,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum SigninFormError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your password")]
    EmptyPassword,
}

impl TryFrom<SigninForm> for SigninFormPayload {
    type Error = SigninFormError;

    fn try_from(value: SigninForm) -> Result<Self, Self::Error> {
        let email = UserEmail::new(value.email).map_err(|_| SigninFormError::InvalidEmail)?;
        if value.password.is_empty() {
            return Err(SigninFormError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signin_form_trims_email() {
        let form = SigninForm {
            email: " clerk@cct.gov.gh ".to_string(),
            password: "hunter2".to_string(),
        };

        let payload: SigninFormPayload = form.try_into().unwrap();
        assert_eq!(payload.email.as_str(), "clerk@cct.gov.gh");
    }

    #[test]
    fn signin_form_rejects_invalid_email() {
        let form = SigninForm {
            email: "not-an-email".to_string(),
            password: "hunter2".to_string(),
        };

        let payload: Result<SigninFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn signin_form_rejects_empty_password() {
        let form = SigninForm {
            email: "clerk@cct.gov.gh".to_string(),
            password: String::new(),
        };

        let err = SigninFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.to_string(), "Please enter your password");
    }
}
