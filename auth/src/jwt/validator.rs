use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::settings::TokenSettings;

/// Tokens larger than this are rejected before any parsing.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8 * 1024;

/// Verifies tokens minted by [`TokenIssuer`](super::TokenIssuer).
///
/// Time checks use the `now` passed by the caller rather than the system
/// clock, so the library's own `exp`/`nbf`/`aud` handling is disabled and
/// every check is performed here.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    settings: Arc<TokenSettings>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(settings: Arc<TokenSettings>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            settings,
            validation,
        }
    }

    /// Validate a presented token at time `now`.
    ///
    /// Checks run in order: structure, signature, expiry, not-before (with
    /// the configured clock skew), issuer, audience. Claims are returned only
    /// when every check passes.
    ///
    /// # Errors
    /// * `Malformed` - Oversized, not a JWT, or not HS256
    /// * `InvalidSignature` - Signature does not match the claim set
    /// * `Expired` - `now` is past `exp`
    /// * `NotYetValid` - `now` is before `iat` minus the clock skew
    /// * `IssuerMismatch` / `AudienceMismatch` - Unexpected `iss` / `aud`
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        if token.len() > MAX_TOKEN_SIZE_BYTES {
            return Err(TokenError::Malformed(format!(
                "token exceeds {} bytes",
                MAX_TOKEN_SIZE_BYTES
            )));
        }

        let claims = decode::<Claims>(token, &self.settings.key().decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        let now = now.timestamp();

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        if now < claims.iat - self.settings.clock_skew().num_seconds() {
            return Err(TokenError::NotYetValid);
        }

        if claims.iss != self.settings.issuer() {
            return Err(TokenError::IssuerMismatch);
        }

        if claims.aud != self.settings.audience() {
            return Err(TokenError::AudienceMismatch);
        }

        Ok(claims)
    }
}
