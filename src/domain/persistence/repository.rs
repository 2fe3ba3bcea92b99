//! Repository and factory contracts

use std::sync::Arc;

use async_trait::async_trait;

use super::entity::{Entity, ObjectId};
use crate::domain::callback::CallbackRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

/// Create/read/list access to one entity type, independent of the backend
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    /// Persists a new record; the backend assigns its id and creation time.
    ///
    /// Fails with `DuplicateKey` when a unique field is already taken and with
    /// `BackendUnavailable` when the store cannot be reached. Adding the same
    /// draft twice creates two records unless a unique field rejects it.
    async fn add(&self, draft: E::Draft) -> Result<E, DomainError>;

    /// Fails with `NotFound` when no record carries the id
    async fn get(&self, id: &ObjectId) -> Result<E, DomainError>;

    /// All records in creation order; empty (never absent) when there are none
    async fn list(&self) -> Result<Vec<E>, DomainError>;
}

/// Produces repositories bound to a single backend
///
/// Built once at startup; repositories created from the same factory share data.
pub trait RepositoryFactory: Send + Sync {
    fn create_user_repository(&self) -> Arc<dyn UserRepository>;

    fn create_callback_repository(&self) -> Arc<dyn CallbackRepository>;
}
