//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers and text values are validated at the boundary. Submission
//! payloads arriving from the public intake forms are the one exception: their
//! free-form fields stay plain strings so that ingestion never rejects a row.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(
    SubmissionId,
    "Unique identifier for an intake submission.",
    "submission_id"
);
id_newtype!(BlogId, "Unique identifier for a blog post.", "blog_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a blog category.",
    "category_id"
);
id_newtype!(UserId, "Unique identifier for a console user.", "user_id");

non_empty_string_newtype!(
    BlogTitle,
    "Blog post title enforcing non-empty values.",
    "blog title"
);
non_empty_string_newtype!(
    CategoryName,
    "Blog category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    UserName,
    "Console user display name enforcing non-empty values.",
    "user name"
);

/// Console user email, trimmed and validated for format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Constructs a trimmed, format-validated email address.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?;
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned email.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserEmail> for String {
    fn from(value: UserEmail) -> Self {
        value.0
    }
}

/// The four intake form families handled by the console.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Passport,
    BirthCertificate,
    Company,
    SoleProprietorship,
}

impl FormType {
    /// Every form family, in display order.
    pub const ALL: [FormType; 4] = [
        FormType::Passport,
        FormType::BirthCertificate,
        FormType::Company,
        FormType::SoleProprietorship,
    ];

    /// Table name this form family is persisted under.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passport => "passport_applications",
            Self::BirthCertificate => "birth_certificates",
            Self::Company => "company_applications",
            Self::SoleProprietorship => "sole_proprietorship_applications",
        }
    }

    /// Page title shown on per-form listing pages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passport => "Passport Applications",
            Self::BirthCertificate => "Birth Certificate Requests",
            Self::Company => "Company Registrations",
            Self::SoleProprietorship => "Sole Proprietorship Registrations",
        }
    }

    /// Title-cased rendering of the table name, used in exports and search.
    pub const fn formatted_name(self) -> &'static str {
        match self {
            Self::Passport => "Passport Applications",
            Self::BirthCertificate => "Birth Certificates",
            Self::Company => "Company Applications",
            Self::SoleProprietorship => "Sole Proprietorship Applications",
        }
    }

    /// Short label used in the distribution chart legend.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Passport => "Passport",
            Self::BirthCertificate => "Birth Certificate",
            Self::Company => "Company",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }

    /// Bucket that uploaded documents for this form family land in.
    pub const fn bucket(self) -> StorageBucket {
        match self {
            Self::Passport => StorageBucket::PassportUploads,
            Self::BirthCertificate => StorageBucket::Uploads,
            Self::Company => StorageBucket::CompanyUploads,
            Self::SoleProprietorship => StorageBucket::SoleProprietorshipUploads,
        }
    }
}

impl Display for FormType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for FormType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "passport_applications" => Ok(Self::Passport),
            "birth_certificates" => Ok(Self::BirthCertificate),
            "company_applications" => Ok(Self::Company),
            "sole_proprietorship_applications" => Ok(Self::SoleProprietorship),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "form type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for FormType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<FormType> for String {
    fn from(value: FormType) -> Self {
        value.as_str().to_string()
    }
}

/// Review status of an intake submission.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
}

impl SubmissionStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }

    /// Interpret a raw status column, defaulting to pending.
    ///
    /// Missing values, stray whitespace and case differences all collapse to
    /// the two canonical states so the console never chokes on historic rows.
    pub fn parse_lossy(value: Option<&str>) -> Self {
        match value {
            Some(raw) if raw.trim().eq_ignore_ascii_case("approved") => Self::Approved,
            _ => Self::Pending,
        }
    }

    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<SubmissionStatus> for String {
    fn from(value: SubmissionStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Named storage buckets for uploaded documents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StorageBucket {
    PassportUploads,
    CompanyUploads,
    SoleProprietorshipUploads,
    Uploads,
}

impl StorageBucket {
    /// Directory name the bucket maps to on disk.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PassportUploads => "passport_uploads",
            Self::CompanyUploads => "company_uploads",
            Self::SoleProprietorshipUploads => "sole_proprietorship_uploads",
            Self::Uploads => "uploads",
        }
    }
}

impl Display for StorageBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for StorageBucket {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "passport_uploads" => Ok(Self::PassportUploads),
            "company_uploads" => Ok(Self::CompanyUploads),
            "sole_proprietorship_uploads" => Ok(Self::SoleProprietorshipUploads),
            "uploads" => Ok(Self::Uploads),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "storage bucket: {other}"
            ))),
        }
    }
}
