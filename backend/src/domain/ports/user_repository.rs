//! Port for credential-store user lookups.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::user::User;

/// Exact-match user lookup used by the login flow.
///
/// The returned record includes the credential hash; callers must not let
/// it escape the authentication path.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login identifier.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
