//! In-memory user repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::persistence::{ObjectId, Repository};
use crate::domain::user::{AuthToken, NewUser, User, UserAuthInfo, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryCollection;

/// In-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<InMemoryCollection<User>>,
}

impl InMemoryUserRepository {
    /// Create a repository over its own empty collection
    pub fn new() -> Self {
        Self::with_collection(Arc::new(InMemoryCollection::new()))
    }

    /// Create a repository over a collection shared with other repositories
    pub fn with_collection(users: Arc<InMemoryCollection<User>>) -> Self {
        Self { users }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<User> for InMemoryUserRepository {
    async fn add(&self, draft: NewUser) -> Result<User, DomainError> {
        self.users.insert(draft)
    }

    async fn get(&self, id: &ObjectId) -> Result<User, DomainError> {
        self.users.get(id)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_auth(
        &self,
        username: &str,
        auth_token: &AuthToken,
    ) -> Result<UserAuthInfo, DomainError> {
        self.users
            .find_one(|u| u.username() == username && u.auth_token() == auth_token)?
            .map(|u| u.auth_info())
            .ok_or_else(|| DomainError::not_found("No user matches the given credentials"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::persistence::Entity;
    use std::collections::HashSet;

    fn new_user(username: &str, token: &str) -> NewUser {
        NewUser::new(username, AuthToken::new(token))
    }

    #[tokio::test]
    async fn test_list_on_fresh_repository_is_empty() {
        let repo = InMemoryUserRepository::new();

        let users = repo.list().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let repo = InMemoryUserRepository::new();

        let user = repo.add(new_user("pjvds", "token-1")).await.unwrap();
        let fetched = repo.get(user.id()).await.unwrap();

        assert_eq!(fetched, user);
        assert_eq!(fetched.username(), "pjvds");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let repo = InMemoryUserRepository::new();

        let result = repo.get(&ObjectId::generate()).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = InMemoryUserRepository::new();

        repo.add(new_user("pjvds", "token-1")).await.unwrap();
        let result = repo.add(new_user("pjvds", "token-2")).await;

        assert!(result.unwrap_err().is_duplicate_key());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_auth_projects_id_and_username() {
        let repo = InMemoryUserRepository::new();
        let user = repo.add(new_user("pjvds", "token-1")).await.unwrap();

        let info = repo
            .get_by_auth("pjvds", &AuthToken::new("token-1"))
            .await
            .unwrap();

        assert_eq!(info.id, *user.id());
        assert_eq!(info.username, "pjvds");

        let json = serde_json::to_value(&info).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(!json.to_string().contains("token-1"));
    }

    #[tokio::test]
    async fn test_get_by_auth_mismatch() {
        let repo = InMemoryUserRepository::new();
        repo.add(new_user("pjvds", "token-1")).await.unwrap();

        let wrong_token = repo.get_by_auth("pjvds", &AuthToken::new("nope")).await;
        assert!(wrong_token.unwrap_err().is_not_found());

        let wrong_user = repo.get_by_auth("someone", &AuthToken::new("token-1")).await;
        assert!(wrong_user.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_shared_collection() {
        let collection = Arc::new(InMemoryCollection::new());
        let a = InMemoryUserRepository::with_collection(collection.clone());
        let b = InMemoryUserRepository::with_collection(collection);

        let user = a.add(new_user("pjvds", "token-1")).await.unwrap();
        assert_eq!(b.get(user.id()).await.unwrap(), user);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_all_kept() {
        const USERS: usize = 64;
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..USERS)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.add(new_user(&format!("user-{}", i), "token")).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), USERS);

        let ids: HashSet<&ObjectId> = users.iter().map(|u| u.id()).collect();
        let names: HashSet<&str> = users.iter().map(|u| u.username()).collect();
        assert_eq!(ids.len(), USERS);
        assert_eq!(names.len(), USERS);
    }
}
