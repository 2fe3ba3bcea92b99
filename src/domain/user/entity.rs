//! User entity and related types

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::persistence::{Entity, ObjectId};

const AUTH_TOKEN_BYTES: usize = 16;

/// Secret a user presents together with their username
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a random hex-encoded token
    pub fn generate() -> Self {
        let mut bytes = [0u8; AUTH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// A registered user
///
/// Stored as `{_id, username, authToken, createdAt}`. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    id: ObjectId,
    username: String,
    auth_token: AuthToken,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// Projection used when answering credential lookups
    pub fn auth_info(&self) -> UserAuthInfo {
        UserAuthInfo {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub auth_token: AuthToken,
}

impl NewUser {
    pub fn new(username: impl Into<String>, auth_token: AuthToken) -> Self {
        Self {
            username: username.into(),
            auth_token,
        }
    }
}

/// Identity of a user whose credentials matched; never carries the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthInfo {
    pub id: ObjectId,
    pub username: String,
}

impl Entity for User {
    type Draft = NewUser;

    const COLLECTION: &'static str = "Users";
    const UNIQUE_FIELDS: &'static [&'static str] = &["username"];

    fn from_draft(id: ObjectId, created_at: DateTime<Utc>, draft: NewUser) -> Self {
        Self {
            id,
            username: draft.username,
            auth_token: draft.auth_token,
            created_at,
        }
    }

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str) -> User {
        User::from_draft(
            ObjectId::generate(),
            Utc::now(),
            NewUser::new(username, AuthToken::new("s3cret")),
        )
    }

    #[test]
    fn test_user_document_shape() {
        let user = create_test_user("pjvds");
        let doc = serde_json::to_value(&user).unwrap();

        assert_eq!(doc["_id"], serde_json::json!(user.id().as_str()));
        assert_eq!(doc["username"], "pjvds");
        assert_eq!(doc["authToken"], "s3cret");
        assert!(doc.get("createdAt").is_some());
        assert!(doc.get("id").is_none());
    }

    #[test]
    fn test_user_document_roundtrip() {
        let user = create_test_user("pjvds");
        let doc = serde_json::to_value(&user).unwrap();
        let restored: User = serde_json::from_value(doc).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_auth_info_drops_token() {
        let user = create_test_user("pjvds");
        let info = serde_json::to_value(user.auth_info()).unwrap();

        assert_eq!(
            info,
            serde_json::json!({ "id": user.id().as_str(), "username": "pjvds" })
        );
    }

    #[test]
    fn test_auth_token_debug_is_redacted() {
        let token = AuthToken::new("s3cret");
        assert!(!format!("{:?}", token).contains("s3cret"));
    }

    #[test]
    fn test_generated_tokens_are_hex_and_distinct() {
        let a = AuthToken::generate();
        let b = AuthToken::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
