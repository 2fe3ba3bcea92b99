//! Domain layer - entities, repository contracts and errors

pub mod callback;
pub mod error;
pub mod persistence;
pub mod user;

pub use callback::{Callback, CallbackRepository, NewCallback};
pub use error::DomainError;
pub use persistence::{Entity, ObjectId, Repository, RepositoryFactory};
pub use user::{AuthToken, NewUser, User, UserAuthInfo, UserRepository};
