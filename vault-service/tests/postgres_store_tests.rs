//! Requires a PostgreSQL server reachable through `DATABASE_URL`; each test
//! gets a fresh database with the migrations applied.

use chrono::SubsecRound;
use chrono::Utc;
use sqlx::PgPool;
use vault_service::domain::identity::errors::StoreError;
use vault_service::domain::identity::models::Identity;
use vault_service::domain::identity::models::IdentityId;
use vault_service::domain::identity::ports::CredentialStore;
use vault_service::outbound::repositories::PostgresCredentialStore;

fn identity(username: &str, email: &str) -> Identity {
    Identity {
        id: IdentityId::new(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        // TIMESTAMPTZ keeps microseconds
        created_at: Utc::now().trunc_subsecs(6),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_then_find(pool: PgPool) {
    let store = PostgresCredentialStore::new(pool);

    let created = store.create(identity("alice", "a@x.com")).await.unwrap();

    assert_eq!(
        store.find_by_username("alice").await.unwrap(),
        Some(created.clone())
    );
    assert_eq!(store.find_by_email("a@x.com").await.unwrap(), Some(created));
    assert_eq!(store.find_by_username("bob").await.unwrap(), None);
    assert_eq!(store.find_by_email("b@x.com").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_maps_to_already_exists(pool: PgPool) {
    let store = PostgresCredentialStore::new(pool);
    store.create(identity("alice", "a@x.com")).await.unwrap();

    let result = store.create(identity("alice", "other@x.com")).await;

    assert_eq!(result, Err(StoreError::AlreadyExists("username".to_string())));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_maps_to_already_exists(pool: PgPool) {
    let store = PostgresCredentialStore::new(pool);
    store.create(identity("alice", "a@x.com")).await.unwrap();

    let result = store.create(identity("bob", "a@x.com")).await;

    assert_eq!(result, Err(StoreError::AlreadyExists("email".to_string())));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_username_lookup_is_case_sensitive(pool: PgPool) {
    let store = PostgresCredentialStore::new(pool);
    store.create(identity("alice", "a@x.com")).await.unwrap();

    assert_eq!(store.find_by_username("Alice").await.unwrap(), None);
    assert!(store.find_by_username("alice").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_registration_has_single_winner(pool: PgPool) {
    let store = std::sync::Arc::new(PostgresCredentialStore::new(pool));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create(identity("alice", &format!("a{}@x.com", i)))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => assert_eq!(e, StoreError::AlreadyExists("username".to_string())),
        }
    }

    assert_eq!(created, 1);
}
