//! User repository trait

use async_trait::async_trait;

use super::entity::{AuthToken, User, UserAuthInfo};
use crate::domain::persistence::Repository;
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Look a user up by username and token together.
    ///
    /// Only the id and username come back, so credential checks cannot leak
    /// the stored token. Fails with `NotFound` when either value does not match.
    async fn get_by_auth(
        &self,
        username: &str,
        auth_token: &AuthToken,
    ) -> Result<UserAuthInfo, DomainError>;
}
