use thiserror::Error;

/// Error type for token operations.
///
/// Validation variants are internal diagnostics: the HTTP layer reports all
/// of them to clients as a generic "unauthorized".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    WeakSigningKey { min: usize, actual: usize },

    #[error("Invalid token settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token issuer does not match")]
    IssuerMismatch,

    #[error("Token audience does not match")]
    AudienceMismatch,
}
