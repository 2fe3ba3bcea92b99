//! Infrastructure layer - storage backends, repository implementations and logging

pub mod callback;
pub mod logging;
pub mod storage;
pub mod user;

pub use storage::{
    DocumentRepositoryFactory, DocumentStoreConfig, InMemoryRepositoryFactory, StorageConfig,
    StorageFactory, StorageType,
};
