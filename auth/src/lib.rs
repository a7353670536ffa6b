//! Credential validation and token issuance library
//!
//! Provides the security-critical building blocks used by the vault service:
//! - Input validation for untrusted credential fields (markup, query-structure and allowlist rules)
//! - Password hashing (Argon2id, PHC strings) and password policy
//! - Signed, time-bounded bearer tokens (HS256 JWT) and their validation
//!
//! Nothing here performs I/O or keeps mutable state. Configuration values are
//! built once by the caller and passed in explicitly.
//!
//! # Examples
//!
//! ## Input Validation
//! ```
//! use auth::{AllowedCharacters, InputValidator, RejectionReason};
//!
//! let validator = InputValidator::new();
//! let password_chars = AllowedCharacters::new("!@#$%^&*?");
//!
//! assert!(validator.validate_str("Abc123!", &password_chars).is_accepted());
//! assert_eq!(
//!     validator.validate_str("admin'; DROP TABLE Users; --", &AllowedCharacters::none()).reason(),
//!     Some(RejectionReason::QueryInjection)
//! );
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{SigningKey, TokenIssuer, TokenSettings, TokenValidator};
//! use chrono::{Duration, Utc};
//!
//! let key = SigningKey::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let settings = Arc::new(
//!     TokenSettings::new(key, "safevault", "clients", Duration::hours(1), Duration::seconds(30))
//!         .unwrap(),
//! );
//!
//! let issuer = TokenIssuer::new(Arc::clone(&settings));
//! let validator = TokenValidator::new(settings);
//!
//! let now = Utc::now();
//! let issued = issuer.issue("user123", now).unwrap();
//! let claims = validator.validate(&issued.token, now).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod jwt;
pub mod password;
pub mod validation;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::SigningKey;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenSettings;
pub use jwt::TokenValidator;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PolicyViolation;
pub use validation::AllowedCharacters;
pub use validation::InputValidator;
pub use validation::RejectionReason;
pub use validation::ValidationResult;
