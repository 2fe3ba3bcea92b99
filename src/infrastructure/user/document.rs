//! Document store user repository implementation

use async_trait::async_trait;
use serde_json::json;

use crate::domain::persistence::{ObjectId, Repository};
use crate::domain::user::{AuthToken, NewUser, User, UserAuthInfo, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{DocumentCollection, DocumentSession};

/// Document store implementation of UserRepository
///
/// Username uniqueness is enforced by the collection's unique index.
#[derive(Debug)]
pub struct DocumentUserRepository {
    users: DocumentCollection<User>,
}

impl DocumentUserRepository {
    pub fn new(session: &DocumentSession) -> Self {
        Self {
            users: session.collection(),
        }
    }
}

#[async_trait]
impl Repository<User> for DocumentUserRepository {
    async fn add(&self, draft: NewUser) -> Result<User, DomainError> {
        self.users.insert(draft).await
    }

    async fn get(&self, id: &ObjectId) -> Result<User, DomainError> {
        self.users.get(id).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn get_by_auth(
        &self,
        username: &str,
        auth_token: &AuthToken,
    ) -> Result<UserAuthInfo, DomainError> {
        let filter = json!({ "username": username, "authToken": auth_token.as_str() });

        self.users
            .find_one_projected(&filter, &[("id", "_id"), ("username", "username")])
            .await?
            .ok_or_else(|| DomainError::not_found("No user matches the given credentials"))
    }
}
