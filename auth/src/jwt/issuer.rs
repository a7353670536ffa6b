use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::settings::TokenSettings;

/// A freshly signed token and the claims it carries.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Wire form: `header.claims.signature`
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Mints HS256-signed, time-bounded tokens.
///
/// Holds no mutable state; safe to share across threads.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    settings: Arc<TokenSettings>,
}

impl TokenIssuer {
    pub fn new(settings: Arc<TokenSettings>) -> Self {
        Self { settings }
    }

    /// Issue a token for `subject`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry is not representable, or serialization or
    ///   signing failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.settings.lifetime())
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iss: self.settings.issuer().to_string(),
            aud: self.settings.audience().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.settings.key().encoding,
        )
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}
