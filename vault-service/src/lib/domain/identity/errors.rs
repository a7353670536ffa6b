use auth::PolicyViolation;
use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Failure reported by a credential store adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Username or email uniqueness constraint hit.
    #[error("Identity already exists: {0}")]
    AlreadyExists(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for registration and authentication.
///
/// `InvalidCredentials` covers both an unknown username and a wrong
/// password. `StoreFailure` and `Internal` carry detail for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Weak password: {0}")]
    WeakPassword(#[from] PolicyViolation),

    #[error("Identity already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Credential store failure: {0}")]
    StoreFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => AuthError::AlreadyExists,
            StoreError::Unavailable(detail) => AuthError::StoreFailure(detail),
        }
    }
}
