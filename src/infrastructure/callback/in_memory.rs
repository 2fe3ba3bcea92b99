//! In-memory callback repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::callback::{Callback, CallbackRepository, NewCallback};
use crate::domain::persistence::{ObjectId, Repository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryCollection;

/// In-memory implementation of CallbackRepository
#[derive(Debug, Clone)]
pub struct InMemoryCallbackRepository {
    callbacks: Arc<InMemoryCollection<Callback>>,
}

impl InMemoryCallbackRepository {
    pub fn new() -> Self {
        Self::with_collection(Arc::new(InMemoryCollection::new()))
    }

    pub fn with_collection(callbacks: Arc<InMemoryCollection<Callback>>) -> Self {
        Self { callbacks }
    }
}

impl Default for InMemoryCallbackRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Callback> for InMemoryCallbackRepository {
    async fn add(&self, draft: NewCallback) -> Result<Callback, DomainError> {
        self.callbacks.insert(draft)
    }

    async fn get(&self, id: &ObjectId) -> Result<Callback, DomainError> {
        self.callbacks.get(id)
    }

    async fn list(&self) -> Result<Vec<Callback>, DomainError> {
        self.callbacks.list()
    }
}

#[async_trait]
impl CallbackRepository for InMemoryCallbackRepository {
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Callback>, DomainError> {
        self.callbacks.find(|c| &c.owner == owner)
    }
}
