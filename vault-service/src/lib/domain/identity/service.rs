use std::sync::Arc;

use async_trait::async_trait;
use auth::AllowedCharacters;
use auth::Claims;
use auth::InputValidator;
use auth::IssuedToken;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::TokenError;
use auth::TokenIssuer;
use auth::TokenSettings;
use auth::TokenValidator;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::models::Credential;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::InputRules;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::MAX_EMAIL_LENGTH;
use crate::domain::identity::models::MAX_PASSWORD_LENGTH;
use crate::domain::identity::models::MAX_USERNAME_LENGTH;
use crate::identity::errors::AuthError;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialStore;

/// Domain service implementation for registration and authentication.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds only immutable state; the store is the single shared resource.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    validator: InputValidator,
    rules: InputRules,
    policy: PasswordPolicy,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    // Verified against when the username is unknown so both failure paths
    // cost one hash verification.
    dummy_hash: String,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `password_hasher` - Hasher used for new and dummy hashes
    /// * `policy` - Password strength policy applied at registration
    /// * `rules` - Per-field character allow-sets
    /// * `token_settings` - Signing key, issuer, audience, lifetime and skew
    ///
    /// # Errors
    /// * `HashingFailed` - Dummy hash could not be generated
    pub fn new(
        store: Arc<S>,
        password_hasher: PasswordHasher,
        policy: PasswordPolicy,
        rules: InputRules,
        token_settings: Arc<TokenSettings>,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash(&Uuid::new_v4().to_string())?;

        Ok(Self {
            store,
            validator: InputValidator::new(),
            rules,
            policy,
            password_hasher,
            token_issuer: TokenIssuer::new(Arc::clone(&token_settings)),
            token_validator: TokenValidator::new(token_settings),
            dummy_hash,
        })
    }

    fn check_field(
        &self,
        field: &'static str,
        value: &str,
        allowed: &AllowedCharacters,
        max_length: usize,
    ) -> Result<(), AuthError> {
        if value.is_empty() {
            return Err(AuthError::InvalidInput(format!("{} is required", field)));
        }

        if value.chars().count() > max_length {
            return Err(AuthError::InvalidInput(format!(
                "{} exceeds {} characters",
                field, max_length
            )));
        }

        self.validator
            .validate_str(value, allowed)
            .into_result()
            .map_err(|reason| {
                tracing::warn!(field, reason = ?reason, "Credential field rejected");
                AuthError::InvalidInput(format!("{}: {}", field, reason))
            })
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, AuthError> {
        self.check_field(
            "username",
            &command.username,
            &self.rules.username,
            MAX_USERNAME_LENGTH,
        )?;
        self.check_field("email", &command.email, &self.rules.email, MAX_EMAIL_LENGTH)?;
        if !email_address::EmailAddress::is_valid(&command.email) {
            return Err(AuthError::InvalidInput(
                "email: invalid email format".to_string(),
            ));
        }
        self.check_field(
            "password",
            &command.password,
            &self.rules.password,
            MAX_PASSWORD_LENGTH,
        )?;

        self.policy.check(&command.password)?;

        if self
            .store
            .find_by_username(&command.username)
            .await?
            .is_some()
            || self.store.find_by_email(&command.email).await?.is_some()
        {
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.store.create(identity).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist identity");
            AuthError::from(e)
        })?;

        tracing::info!(identity_id = %created.id, "Identity registered");

        Ok(created)
    }

    async fn authenticate(&self, credential: Credential) -> Result<IssuedToken, AuthError> {
        self.check_field(
            "username",
            &credential.username,
            &self.rules.username,
            MAX_USERNAME_LENGTH,
        )?;
        self.check_field(
            "password",
            &credential.password,
            &self.rules.password,
            MAX_PASSWORD_LENGTH,
        )?;

        let identity = self
            .store
            .find_by_username(&credential.username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to look up identity");
                AuthError::from(e)
            })?;

        let stored_hash = identity
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |i| i.password_hash.as_str());
        let verified = self.password_hasher.verify(&credential.password, stored_hash);

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => {
                tracing::info!("Authentication failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self
            .token_issuer
            .issue(&identity.id.to_string(), Utc::now())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to issue token");
                AuthError::Internal(e.to_string())
            })?;

        tracing::info!(
            identity_id = %identity.id,
            expires_at = %issued.expires_at(),
            "Identity authenticated"
        );

        Ok(issued)
    }

    fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_validator.validate(token, Utc::now())
    }
}
