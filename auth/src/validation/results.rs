use thiserror::Error;

/// Verdict produced by [`InputValidator`](super::InputValidator).
///
/// Consumed immediately by the caller and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(RejectionReason),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    /// Reason for rejection, `None` when accepted.
    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            ValidationResult::Accepted => None,
            ValidationResult::Rejected(reason) => Some(*reason),
        }
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), RejectionReason> {
        match self {
            ValidationResult::Accepted => Ok(()),
            ValidationResult::Rejected(reason) => Err(reason),
        }
    }
}

/// Why an input was rejected.
///
/// Display messages never echo the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("input contains a markup or script marker")]
    MarkupInjection,

    #[error("input contains a query structure marker")]
    QueryInjection,

    #[error("input contains a character that is not allowed")]
    DisallowedCharacter(char),
}
