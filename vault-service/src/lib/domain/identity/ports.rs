use async_trait::async_trait;
use auth::Claims;
use auth::IssuedToken;
use auth::TokenError;

use crate::domain::identity::models::Credential;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::RegisterCommand;
use crate::identity::errors::AuthError;
use crate::identity::errors::StoreError;

/// Port for registration and authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Raw username, email and password
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `InvalidInput` - A field failed injection or format checks
    /// * `WeakPassword` - Password does not meet the policy
    /// * `AlreadyExists` - Username or email is already registered
    /// * `StoreFailure` - Persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, AuthError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `credential` - Username and plaintext password
    ///
    /// # Returns
    /// Signed token with its claims
    ///
    /// # Errors
    /// * `InvalidInput` - A field failed injection or format checks
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `StoreFailure` - Lookup failed
    async fn authenticate(&self, credential: Credential) -> Result<IssuedToken, AuthError>;

    /// Validate a presented bearer token against the current time.
    ///
    /// # Errors
    /// * `TokenError` - Any signature, expiry, issuer or audience failure
    fn validate_token(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Persistence operations for stored identities.
///
/// Implementations enforce username and email uniqueness and report a
/// violation as `StoreError::AlreadyExists`, including under concurrent
/// registration.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve identity by exact username.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    /// Retrieve identity by email address.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Persist a new identity.
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already taken
    /// * `Unavailable` - Store operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, StoreError>;
}
