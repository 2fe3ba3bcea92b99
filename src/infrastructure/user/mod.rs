//! User infrastructure module
//!
//! Backend-specific implementations of the user repository.

mod document;
mod in_memory;

pub use document::DocumentUserRepository;
pub use in_memory::InMemoryUserRepository;
