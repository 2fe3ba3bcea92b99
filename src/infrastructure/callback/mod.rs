//! Callback infrastructure - backend-specific repositories

mod document;
mod in_memory;

pub use document::DocumentCallbackRepository;
pub use in_memory::InMemoryCallbackRepository;
