use std::env;

use auth::HashingParams;
use auth::PasswordPolicy;
use auth::SigningKey;
use auth::TokenError;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::identity::models::InputRules;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Absent in development, where the in-memory store is used.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub hashing: HashingParams,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub lifetime_minutes: i64,
    #[serde(default = "default_clock_skew_seconds")]
    pub clock_skew_seconds: i64,
}

fn default_clock_skew_seconds() -> i64 {
    30
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime_minutes", &self.lifetime_minutes)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
    pub allowed_special_characters: String,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let policy = PasswordPolicy::default();
        Self {
            min_length: policy.min_length,
            require_digit: policy.require_digit,
            require_lowercase: policy.require_lowercase,
            require_uppercase: policy.require_uppercase,
            require_non_alphanumeric: policy.require_non_alphanumeric,
            allowed_special_characters: "!@#$%^&*?".to_string(),
        }
    }
}

impl PasswordConfig {
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_length,
            require_digit: self.require_digit,
            require_lowercase: self.require_lowercase,
            require_uppercase: self.require_uppercase,
            require_non_alphanumeric: self.require_non_alphanumeric,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }

    /// Build the immutable token settings shared by issuer and validator.
    ///
    /// # Errors
    /// * `WeakSigningKey` - Secret is shorter than the minimum key length
    /// * `InvalidSettings` - Empty issuer/audience, or lifetime or skew out of bounds
    pub fn token_settings(&self) -> Result<TokenSettings, TokenError> {
        let key = SigningKey::new(self.jwt.secret.as_bytes())?;
        let lifetime = chrono::Duration::try_minutes(self.jwt.lifetime_minutes).ok_or_else(|| {
            TokenError::InvalidSettings("lifetime_minutes out of range".to_string())
        })?;
        let clock_skew =
            chrono::Duration::try_seconds(self.jwt.clock_skew_seconds).ok_or_else(|| {
                TokenError::InvalidSettings("clock_skew_seconds out of range".to_string())
            })?;

        TokenSettings::new(
            key,
            self.jwt.issuer.clone(),
            self.jwt.audience.clone(),
            lifetime,
            clock_skew,
        )
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        self.password.policy()
    }

    pub fn input_rules(&self) -> InputRules {
        InputRules::new(&self.password.allowed_special_characters)
    }
}
