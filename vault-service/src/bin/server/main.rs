use std::sync::Arc;

use anyhow::Context;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vault_service::config::Config;
use vault_service::domain::identity::ports::AuthServicePort;
use vault_service::domain::identity::service::AuthService;
use vault_service::inbound::http::router::create_router;
use vault_service::outbound::repositories::InMemoryCredentialStore;
use vault_service::outbound::repositories::PostgresCredentialStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "vault-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.is_some() { "postgresql" } else { "memory" },
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        jwt_lifetime_minutes = config.jwt.lifetime_minutes,
        "Configuration loaded"
    );

    let token_settings = Arc::new(
        config
            .token_settings()
            .context("Invalid token configuration")?,
    );
    let password_hasher =
        PasswordHasher::with_params(config.hashing).context("Invalid hashing parameters")?;

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(AuthService::new(
                Arc::new(PostgresCredentialStore::new(pg_pool)),
                password_hasher,
                config.password_policy(),
                config.input_rules(),
                token_settings,
            )?)
        }
        None => {
            tracing::warn!("No database configured, identities are kept in memory");

            Arc::new(AuthService::new(
                Arc::new(InMemoryCredentialStore::new()),
                password_hasher,
                config.password_policy(),
                config.input_rules(),
                token_settings,
            )?)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    tracing::info!("Server exited");

    Ok(())
}
