use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace, warn};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(user_id = %user.id, email = %user.email))]
    async fn insert_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;

        // Checked under the write lock so two signups cannot claim one email.
        if storage.values().any(|u| u.email == user.email) {
            warn!(email = %user.email, "Email already present in storage");
            return Err(DomainError::DuplicateEmail.into());
        }

        trace!(user_id = %user.id, email = %user.email, "Inserting user into storage");
        storage.insert(user.id.clone(), user.clone());
        debug!(
            user_id = %user.id,
            email = %user.email,
            "User saved to memory storage"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.id, email = %u.email, "User found in storage"),
            None => trace!(email = email, "User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.get(id).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.id, email = %u.email, "User found in storage"),
            None => trace!(user_id = id, "User not found in storage"),
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            name: format!("Name of {}", id),
            password_hash: format!("hash-{}", id),
            created_at: Utc::now(),
            is_premium: false,
        }
    }

    #[tokio::test]
    async fn test_insert_user_saves_user_correctly() {
        let repo = InMemoryUserRepository::new();
        let saved = user("user-1", "test@example.com");

        repo.insert_user(saved.clone()).await.unwrap();

        let retrieved = repo.find_user_by_id("user-1").await.unwrap().unwrap();
        assert_eq!(retrieved.id, saved.id);
        assert_eq!(retrieved.email, saved.email);
        assert_eq!(retrieved.name, saved.name);
        assert_eq!(retrieved.password_hash, saved.password_hash);
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(user("user-1", "dup@example.com")).await.unwrap();

        let err = repo
            .insert_user(user("user-2", "dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::DuplicateEmail)
        ));
        assert!(repo.find_user_by_id("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_email_finds_user_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(user("user-2", "alice@example.com")).await.unwrap();

        let found = repo.find_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, "user-2");
    }

    #[tokio::test]
    async fn test_find_user_by_email_returns_none_for_nonexistent_email() {
        let repo = InMemoryUserRepository::new();

        let found = repo
            .find_user_by_email("nonexistent@example.com")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_id_returns_none_for_nonexistent_id() {
        let repo = InMemoryUserRepository::new();

        let found = repo.find_user_by_id("nonexistent-id").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_email_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert_user(user("user-5", "Test@Example.com")).await.unwrap();

        assert!(repo.find_user_by_email("Test@Example.com").await.unwrap().is_some());
        assert!(repo.find_user_by_email("test@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_signups_with_same_email_admit_one() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo_clone = repo.clone();
                let candidate = user(&format!("user-{}", i), "race@example.com");
                tokio::spawn(async move { repo_clone.insert_user(candidate).await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }

    #[tokio::test]
    async fn test_concurrent_writes() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo_clone = repo.clone();
                let candidate = user(&format!("user-{}", i), &format!("user{}@example.com", i));
                tokio::spawn(async move { repo_clone.insert_user(candidate).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        for i in 0..10 {
            let found = repo.find_user_by_id(&format!("user-{}", i)).await.unwrap();
            assert_eq!(found.unwrap().email, format!("user{}@example.com", i));
        }
    }
}
