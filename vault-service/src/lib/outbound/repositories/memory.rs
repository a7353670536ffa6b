use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::CredentialStore;
use crate::identity::errors::StoreError;

/// Process-local credential store for development and tests.
///
/// Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;

        Ok(identities
            .values()
            .find(|identity| identity.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;

        Ok(identities
            .values()
            .find(|identity| identity.email == email)
            .cloned())
    }

    async fn create(&self, identity: Identity) -> Result<Identity, StoreError> {
        // Uniqueness check and insert happen under one write lock.
        let mut identities = self.identities.write().await;

        for existing in identities.values() {
            if existing.username == identity.username {
                return Err(StoreError::AlreadyExists("username".to_string()));
            }
            if existing.email == identity.email {
                return Err(StoreError::AlreadyExists("email".to_string()));
            }
        }

        identities.insert(identity.id, identity.clone());

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;

    fn identity(username: &str, email: &str) -> Identity {
        Identity {
            id: IdentityId::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=64,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = InMemoryCredentialStore::new();
        let created = store.create(identity("alice", "a@x.com")).await.unwrap();

        assert_eq!(
            store.find_by_username("alice").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.find_by_email("a@x.com").await.unwrap(), Some(created));
        assert_eq!(store.find_by_username("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        let store = InMemoryCredentialStore::new();
        store.create(identity("alice", "a@x.com")).await.unwrap();

        assert_eq!(store.find_by_username("Alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_rejected() {
        let store = InMemoryCredentialStore::new();
        store.create(identity("alice", "a@x.com")).await.unwrap();

        assert_eq!(
            store.create(identity("alice", "other@x.com")).await,
            Err(StoreError::AlreadyExists("username".to_string()))
        );
        assert_eq!(
            store.create(identity("other", "a@x.com")).await,
            Err(StoreError::AlreadyExists("email".to_string()))
        );
    }

    #[tokio::test]
    async fn test_concurrent_registration_has_single_winner() {
        let store = Arc::new(InMemoryCredentialStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
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
}
