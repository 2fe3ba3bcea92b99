//! Document store callback repository

use async_trait::async_trait;
use serde_json::json;

use crate::domain::callback::{Callback, CallbackRepository, NewCallback};
use crate::domain::persistence::{ObjectId, Repository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{DocumentCollection, DocumentSession};

/// Document store implementation of CallbackRepository
#[derive(Debug)]
pub struct DocumentCallbackRepository {
    callbacks: DocumentCollection<Callback>,
}

impl DocumentCallbackRepository {
    pub fn new(session: &DocumentSession) -> Self {
        Self {
            callbacks: session.collection(),
        }
    }
}

#[async_trait]
impl Repository<Callback> for DocumentCallbackRepository {
    async fn add(&self, draft: NewCallback) -> Result<Callback, DomainError> {
        self.callbacks.insert(draft).await
    }

    async fn get(&self, id: &ObjectId) -> Result<Callback, DomainError> {
        self.callbacks.get(id).await
    }

    async fn list(&self) -> Result<Vec<Callback>, DomainError> {
        self.callbacks.list().await
    }
}

#[async_trait]
impl CallbackRepository for DocumentCallbackRepository {
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Callback>, DomainError> {
        self.callbacks
            .find(&json!({ "owner": owner.as_str() }))
            .await
    }
}
