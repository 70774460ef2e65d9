//! Numeric surrogate identifiers for persisted entities.
//!
//! Identifiers are issued by the database (`BIGSERIAL`) so they are always
//! positive. Inbound adapters validate untrusted input with
//! [`IdValidationError`] before building one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error for identifiers parsed from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The text was not an integer.
    #[error("identifier must be an integer")]
    NotNumeric,
    /// The value was zero or negative.
    #[error("identifier must be positive")]
    NotPositive,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Validate an identifier supplied by a client.
            ///
            /// # Errors
            /// Returns [`IdValidationError::NotPositive`] for values below one.
            pub fn try_new(raw: i64) -> Result<Self, IdValidationError> {
                if raw < 1 {
                    return Err(IdValidationError::NotPositive);
                }
                Ok(Self(raw))
            }

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotNumeric)?;
                Self::try_new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

entity_id! {
    /// Identifier of a menu row.
    MenuId
}

entity_id! {
    /// Identifier of an eating genre (reference data).
    GenreId
}

entity_id! {
    /// Identifier of an eating category (reference data).
    CategoryId
}

entity_id! {
    /// Internal identifier of a user, distinct from the external subject.
    UserId
}

entity_id! {
    /// Identifier of a favourite row.
    FavoriteId
}
