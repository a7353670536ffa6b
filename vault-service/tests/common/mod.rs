#![allow(dead_code)]

use std::sync::Arc;

use auth::HashingParams;
use auth::IssuedToken;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::SigningKey;
use auth::TokenIssuer;
use auth::TokenSettings;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use vault_service::domain::identity::models::InputRules;
use vault_service::domain::identity::service::AuthService;
use vault_service::inbound::http::router::create_router;
use vault_service::outbound::repositories::InMemoryCredentialStore;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ISSUER: &str = "safevault";
pub const AUDIENCE: &str = "safevault-clients";

/// Cheap Argon2 parameters so debug-build tests stay fast.
pub const FAST_HASHING: HashingParams = HashingParams {
    memory_kib: 64,
    iterations: 1,
    parallelism: 1,
};

pub fn token_settings() -> Arc<TokenSettings> {
    Arc::new(
        TokenSettings::new(
            SigningKey::new(SECRET).expect("Failed to build signing key"),
            ISSUER,
            AUDIENCE,
            Duration::minutes(60),
            Duration::seconds(30),
        )
        .expect("Failed to build token settings"),
    )
}

pub fn auth_service(hashing: HashingParams) -> AuthService<InMemoryCredentialStore> {
    AuthService::new(
        Arc::new(InMemoryCredentialStore::new()),
        PasswordHasher::with_params(hashing).expect("Failed to build hasher"),
        PasswordPolicy::default(),
        InputRules::new("!@#$%^&*?"),
        token_settings(),
    )
    .expect("Failed to build auth service")
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(Arc::new(auth_service(FAST_HASHING)));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(token_settings()),
        }
    }

    /// Sign a token with the server's key at an arbitrary issue time
    pub fn issue_token_at(&self, subject: &str, now: DateTime<Utc>) -> IssuedToken {
        self.token_issuer
            .issue(subject, now)
            .expect("Failed to issue token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
