//! Repository factories and startup backend selection

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::callback::{Callback, CallbackRepository};
use crate::domain::persistence::RepositoryFactory;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::callback::{DocumentCallbackRepository, InMemoryCallbackRepository};
use crate::infrastructure::user::{DocumentUserRepository, InMemoryUserRepository};

use super::document::{DocumentSession, DocumentStoreConfig};
use super::in_memory::InMemoryCollection;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// Process memory (for testing/demos)
    InMemory,
    /// Remote document store
    Document,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Document(DocumentStoreConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn document(config: DocumentStoreConfig) -> Self {
        Self::Document(config)
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Document(_) => StorageType::Document,
        }
    }
}

/// Factory whose repositories live in process memory
///
/// Never fails to construct. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryRepositoryFactory {
    users: Arc<InMemoryCollection<User>>,
    callbacks: Arc<InMemoryCollection<Callback>>,
}

impl InMemoryRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryFactory for InMemoryRepositoryFactory {
    fn create_user_repository(&self) -> Arc<dyn UserRepository> {
        Arc::new(InMemoryUserRepository::with_collection(self.users.clone()))
    }

    fn create_callback_repository(&self) -> Arc<dyn CallbackRepository> {
        Arc::new(InMemoryCallbackRepository::with_collection(
            self.callbacks.clone(),
        ))
    }
}

/// Factory whose repositories share one pooled document store session
#[derive(Debug, Clone)]
pub struct DocumentRepositoryFactory {
    session: DocumentSession,
}

impl DocumentRepositoryFactory {
    /// Opens the session and prepares every collection.
    ///
    /// Any failure is reported as `Connection`.
    pub async fn connect(config: &DocumentStoreConfig) -> Result<Self, DomainError> {
        let session = DocumentSession::open(config).await?;

        let prepared = async {
            session.collection::<User>().ensure_collection().await?;
            session.collection::<Callback>().ensure_collection().await
        };

        prepared.await.map_err(|e| {
            DomainError::connection(format!(
                "Failed to prepare collections in '{}': {}",
                session.database(),
                e
            ))
        })?;

        Ok(Self { session })
    }
}

impl RepositoryFactory for DocumentRepositoryFactory {
    fn create_user_repository(&self) -> Arc<dyn UserRepository> {
        Arc::new(DocumentUserRepository::new(&self.session))
    }

    fn create_callback_repository(&self) -> Arc<dyn CallbackRepository> {
        Arc::new(DocumentCallbackRepository::new(&self.session))
    }
}

/// Selects and builds the single repository factory for the process
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn RepositoryFactory>, DomainError> {
        info!(storage_type = ?config.storage_type(), "Creating repository factory");

        match config {
            StorageConfig::InMemory => {
                debug!("Running with in-memory data store");
                Ok(Arc::new(InMemoryRepositoryFactory::new()))
            }
            StorageConfig::Document(document_config) => {
                debug!("Running with document data store");
                debug!(
                    server_url = %document_config.server_url,
                    database = %document_config.database_name,
                    "Connecting to document store"
                );

                match DocumentRepositoryFactory::connect(document_config).await {
                    Ok(factory) => {
                        debug!("Connected successfully");
                        Ok(Arc::new(factory))
                    }
                    Err(e) => {
                        error!("Unable to connect to document store: {}", e);
                        Err(e)
                    }
                }
            }
        }
    }
}
