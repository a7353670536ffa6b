use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Password strength requirements checked at registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: false,
        }
    }
}

/// A single unmet policy requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    MinLength { min: usize, actual: usize },
    Digit,
    Lowercase,
    Uppercase,
    NonAlphanumeric,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::MinLength { min, actual } => {
                write!(f, "at least {} characters (got {})", min, actual)
            }
            Requirement::Digit => f.write_str("a digit"),
            Requirement::Lowercase => f.write_str("a lowercase letter"),
            Requirement::Uppercase => f.write_str("an uppercase letter"),
            Requirement::NonAlphanumeric => f.write_str("a non-alphanumeric character"),
        }
    }
}

/// Every requirement a password failed to meet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password must contain {}", join(.unmet))]
pub struct PolicyViolation {
    pub unmet: Vec<Requirement>,
}

fn join(unmet: &[Requirement]) -> String {
    unmet
        .iter()
        .map(Requirement::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PasswordPolicy {
    /// Check a plaintext password against the policy.
    ///
    /// Length is counted in characters. Character classes follow Unicode,
    /// matching the alphanumeric rule of the input validator.
    ///
    /// # Errors
    /// * `PolicyViolation` - Lists every unmet requirement
    pub fn check(&self, password: &str) -> Result<(), PolicyViolation> {
        let mut unmet = Vec::new();

        let length = password.chars().count();
        if length < self.min_length {
            unmet.push(Requirement::MinLength {
                min: self.min_length,
                actual: length,
            });
        }
        if self.require_digit && !password.chars().any(char::is_numeric) {
            unmet.push(Requirement::Digit);
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            unmet.push(Requirement::Lowercase);
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            unmet.push(Requirement::Uppercase);
        }
        if self.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
            unmet.push(Requirement::NonAlphanumeric);
        }

        if unmet.is_empty() {
            Ok(())
        } else {
            Err(PolicyViolation { unmet })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_accepts_mixed_password() {
        let policy = PasswordPolicy::default();

        assert!(policy.check("Abc123!").is_ok());
        assert!(policy.check("Abc123").is_ok());
    }

    #[test]
    fn test_reports_every_unmet_requirement() {
        let policy = PasswordPolicy::default();

        let violation = policy.check("abc").unwrap_err();
        assert_eq!(
            violation.unmet,
            vec![
                Requirement::MinLength { min: 6, actual: 3 },
                Requirement::Digit,
                Requirement::Uppercase,
            ]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_digit: false,
            require_lowercase: false,
            require_uppercase: false,
            require_non_alphanumeric: false,
        };

        // Four characters, eight bytes.
        assert!(policy.check("éééé").is_ok());
        assert!(policy.check("ééé").is_err());
    }

    #[test]
    fn test_non_alphanumeric_requirement() {
        let policy = PasswordPolicy {
            require_non_alphanumeric: true,
            ..PasswordPolicy::default()
        };

        assert_eq!(
            policy.check("Abc123").unwrap_err().unmet,
            vec![Requirement::NonAlphanumeric]
        );
        assert!(policy.check("Abc123!").is_ok());
    }

    #[test]
    fn test_violation_message() {
        let policy = PasswordPolicy::default();

        let message = policy.check("ABCDEF").unwrap_err().to_string();
        assert_eq!(message, "password must contain a digit, a lowercase letter");
    }

    #[test]
    fn test_character_classes_are_unicode() {
        let policy = PasswordPolicy::default();

        // Arabic-Indic digits with accented letters
        assert_eq!(policy.check("Éclair\u{0663}"), Ok(()));
        assert_eq!(
            policy.check("ÉCLAIR1").unwrap_err().unmet,
            vec![Requirement::Lowercase]
        );
        assert_eq!(
            policy.check("éclairs").unwrap_err().unmet,
            vec![Requirement::Digit, Requirement::Uppercase]
        );
    }
}
