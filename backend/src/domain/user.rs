//! User data model.
//!
//! Users are keyed internally by a numeric [`UserId`] and externally by the
//! identity provider's subject claim. The subject is unique across users.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// Maximum subject length, matching the `auth0_sub` column.
pub const SUBJECT_MAX: usize = 255;

/// Validation errors returned by [`Subject::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for SubjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "subject must not be empty"),
            Self::TooLong { max } => write!(f, "subject must be at most {max} characters"),
        }
    }
}

impl std::error::Error for SubjectValidationError {}

/// External identity-provider subject (for example `auth0|abc123`).
///
/// # Examples
/// ```
/// use menu_backend::domain::Subject;
///
/// let subject = Subject::new("auth0|abc").unwrap();
/// assert_eq!(subject.as_ref(), "auth0|abc");
/// assert!(Subject::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    /// Validate and construct a [`Subject`].
    pub fn new(subject: impl Into<String>) -> Result<Self, SubjectValidationError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(SubjectValidationError::Empty);
        }
        if subject.chars().count() > SUBJECT_MAX {
            return Err(SubjectValidationError::TooLong { max: SUBJECT_MAX });
        }
        Ok(Self(subject))
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub subject: Subject,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of resolving a subject to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub user: User,
    /// `true` only when this call inserted the row.
    pub is_new: bool,
}
