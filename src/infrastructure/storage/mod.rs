//! Storage infrastructure - backends and repository factories

mod document;
mod factory;
mod in_memory;

pub use document::{DocumentCollection, DocumentSession, DocumentStoreConfig};
pub use factory::{
    DocumentRepositoryFactory, InMemoryRepositoryFactory, StorageConfig, StorageFactory,
    StorageType,
};
pub use in_memory::InMemoryCollection;
