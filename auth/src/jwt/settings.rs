use std::fmt;

use chrono::Duration;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::TokenError;

/// Minimum HS256 secret length in bytes (256 bits).
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted token lifetime.
pub const MAX_LIFETIME_DAYS: i64 = 366;

/// Largest accepted clock skew allowance.
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 3600;

/// HMAC key material shared by the issuer and the validator.
#[derive(Clone)]
pub struct SigningKey {
    pub(crate) encoding: EncodingKey,
    pub(crate) decoding: DecodingKey,
}

impl SigningKey {
    /// Build a signing key from a raw secret.
    ///
    /// # Errors
    /// * `WeakSigningKey` - Secret is shorter than [`MIN_SECRET_LENGTH`]
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSigningKey {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Immutable token configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    key: SigningKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
    clock_skew: Duration,
}

impl TokenSettings {
    /// # Errors
    /// * `InvalidSettings` - Empty issuer or audience, lifetime outside
    ///   `(0, MAX_LIFETIME_DAYS]`, or clock skew outside
    ///   `[0, MAX_CLOCK_SKEW_SECONDS]`
    pub fn new(
        key: SigningKey,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        lifetime: Duration,
        clock_skew: Duration,
    ) -> Result<Self, TokenError> {
        let issuer = issuer.into();
        let audience = audience.into();

        if issuer.is_empty() {
            return Err(TokenError::InvalidSettings("issuer is empty".to_string()));
        }
        if audience.is_empty() {
            return Err(TokenError::InvalidSettings("audience is empty".to_string()));
        }
        if lifetime <= Duration::zero() {
            return Err(TokenError::InvalidSettings(
                "lifetime must be positive".to_string(),
            ));
        }
        if lifetime > Duration::days(MAX_LIFETIME_DAYS) {
            return Err(TokenError::InvalidSettings(format!(
                "lifetime must not exceed {} days",
                MAX_LIFETIME_DAYS
            )));
        }
        if clock_skew < Duration::zero() {
            return Err(TokenError::InvalidSettings(
                "clock skew must not be negative".to_string(),
            ));
        }
        if clock_skew > Duration::seconds(MAX_CLOCK_SKEW_SECONDS) {
            return Err(TokenError::InvalidSettings(format!(
                "clock skew must not exceed {} seconds",
                MAX_CLOCK_SKEW_SECONDS
            )));
        }

        Ok(Self {
            key,
            issuer,
            audience,
            lifetime,
            clock_skew,
        })
    }

    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn clock_skew(&self) -> Duration {
        self.clock_skew
    }
}
