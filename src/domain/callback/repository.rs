//! Callback repository trait

use async_trait::async_trait;

use super::entity::Callback;
use crate::domain::persistence::{ObjectId, Repository};
use crate::domain::DomainError;

/// Repository for callback persistence
#[async_trait]
pub trait CallbackRepository: Repository<Callback> {
    /// Callbacks registered by one user, in creation order
    async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Callback>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::callback::NewCallback;
    use crate::domain::persistence::Entity;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Callback repository that records adds and can be told to fail
    #[derive(Debug, Default)]
    pub struct MockCallbackRepository {
        callbacks: Mutex<Vec<Callback>>,
        error: Mutex<Option<String>>,
    }

    impl MockCallbackRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::backend_unavailable(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Repository<Callback> for MockCallbackRepository {
        async fn add(&self, draft: NewCallback) -> Result<Callback, DomainError> {
            self.check_error()?;
            let callback = Callback::from_draft(ObjectId::generate(), Utc::now(), draft);
            self.callbacks.lock().unwrap().push(callback.clone());
            Ok(callback)
        }

        async fn get(&self, id: &ObjectId) -> Result<Callback, DomainError> {
            self.check_error()?;
            self.callbacks
                .lock()
                .unwrap()
                .iter()
                .find(|c| &c.id == id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("Callback '{}' not found", id)))
        }

        async fn list(&self) -> Result<Vec<Callback>, DomainError> {
            self.check_error()?;
            Ok(self.callbacks.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl CallbackRepository for MockCallbackRepository {
        async fn list_by_owner(&self, owner: &ObjectId) -> Result<Vec<Callback>, DomainError> {
            self.check_error()?;
            Ok(self
                .callbacks
                .lock()
                .unwrap()
                .iter()
                .filter(|c| &c.owner == owner)
                .cloned()
                .collect())
        }
    }
}
