//! Persistence domain - backend-agnostic entity and repository contracts

mod entity;
mod repository;

pub use entity::{Entity, ObjectId};
pub use repository::{Repository, RepositoryFactory};
