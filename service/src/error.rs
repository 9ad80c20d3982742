use sea_orm::{DbErr, TransactionError};

/// Everything the access layer can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing or a value is out of range.
    #[error("{0}")]
    Validation(String),
    /// No record with the requested identifier.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The store refused a write because of concurrent or duplicate data.
    #[error("{0}")]
    Conflict(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub(crate) fn required(entity: &str, field: &str) -> Self {
        Self::Validation(format!("{entity} validation failed: {field} is required"))
    }

    pub(crate) fn invalid(entity: &str, field: &str, reason: &str) -> Self {
        Self::Validation(format!("{entity} validation failed: {field} {reason}"))
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            // begin/commit failures: the unit of work did not go through as a whole
            TransactionError::Connection(err) => Self::Conflict(err.to_string()),
            // the unit of work was rolled back; the caller gets the store's message
            TransactionError::Transaction(Self::Db(err)) => Self::Conflict(err.to_string()),
            TransactionError::Transaction(err) => err,
        }
    }
}
