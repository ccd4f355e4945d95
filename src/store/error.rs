use thiserror::Error;

/// Domain error taxonomy. Every store operation fails with one of these;
/// the API boundary maps them onto HTTP statuses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Bad input shape (blank name, missing major for an upper year, ...)
    #[error("{0}")]
    Validation(String),

    /// Unknown id or username reference
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation or illegal state transition
    #[error("{0}")]
    Conflict(String),

    /// Business-rule gate not satisfied (incomplete requirements at submit)
    #[error("{0}")]
    Precondition(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        StoreError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        StoreError::Conflict(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        StoreError::Precondition(msg.into())
    }
}
