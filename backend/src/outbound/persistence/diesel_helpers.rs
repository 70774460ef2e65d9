//! Shared helpers for the Diesel repositories.
//!
//! - Error mapping from pool and Diesel failures into each port's error type.
//! - [`TxError`], the error type of transactional closures that need to
//!   abort with a port-specific outcome (for example "menu not found").
//! - Unique-violation detection for race handling.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{FavoriteRepositoryError, MenuRepositoryError, UserRepositoryError};

use super::pool::PoolError;

/// Port errors that carry the generic connection/query pair.
pub(crate) trait StorageError: Sized {
    fn connection_failure(message: String) -> Self;
    fn query_failure(message: String) -> Self;
}

macro_rules! impl_storage_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl StorageError for $error {
                fn connection_failure(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failure(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_storage_error!(
    FavoriteRepositoryError,
    MenuRepositoryError,
    UserRepositoryError
);

/// Map a checkout failure to the port's connection error.
pub(crate) fn map_pool_error<E: StorageError>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            E::connection_failure(message)
        }
    }
}

/// Map a Diesel failure to the port's connection or query error.
///
/// Driver detail is logged at debug level and replaced by a stable message.
pub(crate) fn map_diesel_error<E: StorageError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::query_failure("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failure("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            E::connection_failure("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            E::query_failure("concurrent update conflict".to_owned())
        }
        _ => E::query_failure("database error".to_owned()),
    }
}

/// Whether `error` is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Error type for transactional closures.
///
/// Returning `Err` from the closure rolls the transaction back whichever
/// variant it carries.
#[derive(Debug)]
pub(crate) enum TxError<E> {
    Diesel(DieselError),
    Port(E),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl<E: StorageError> TxError<E> {
    /// Collapse into the port error.
    pub(crate) fn into_port(self) -> E {
        match self {
            Self::Diesel(error) => map_diesel_error(error),
            Self::Port(error) => error,
        }
    }
}
