//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the cross-layer `From` impls live here instead of next to the types.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::auth::SigninFormError;
    use crate::forms::blog::{AddBlogFormError, EditBlogFormError};
    use crate::forms::categories::AddCategoryFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<SigninFormError> for ServiceError {
        fn from(val: SigninFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<AddBlogFormError> for ServiceError {
        fn from(val: AddBlogFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<EditBlogFormError> for ServiceError {
        fn from(val: EditBlogFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<AddCategoryFormError> for ServiceError {
        fn from(val: AddCategoryFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
