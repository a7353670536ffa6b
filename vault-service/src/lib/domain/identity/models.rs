use std::fmt;

use auth::AllowedCharacters;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::IdentityIdError;

/// Punctuation permitted in usernames besides alphanumerics.
pub const USERNAME_EXTRA_CHARACTERS: &str = "_-.";

/// Punctuation permitted in email addresses besides alphanumerics.
pub const EMAIL_EXTRA_CHARACTERS: &str = "@._-+";

pub const MAX_USERNAME_LENGTH: usize = 64;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Upper bound on password length, keeps hashing cost bounded.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Registered identity.
///
/// Usernames compare case-sensitively.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username/password pair submitted for authentication.
///
/// Lives only for the duration of a login call.
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to register a new identity.
#[derive(Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    /// Plain text password (will be hashed by service)
    pub password: String,
}

impl RegisterCommand {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("username", &"<redacted>")
            .field("email", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Allow-sets applied to each credential field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRules {
    pub username: AllowedCharacters,
    pub email: AllowedCharacters,
    pub password: AllowedCharacters,
}

impl InputRules {
    /// Build the field rules with the configured password special characters.
    pub fn new(password_special_characters: &str) -> Self {
        Self {
            username: AllowedCharacters::new(USERNAME_EXTRA_CHARACTERS),
            email: AllowedCharacters::new(EMAIL_EXTRA_CHARACTERS),
            password: AllowedCharacters::new(password_special_characters),
        }
    }
}
