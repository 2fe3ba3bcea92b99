//! User domain
//!
//! Users own callbacks and authenticate with a username plus an opaque token.

mod entity;
mod repository;
mod validation;

pub use entity::{AuthToken, NewUser, User, UserAuthInfo};
pub use repository::UserRepository;
pub use validation::{validate_username, UserValidationError};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
