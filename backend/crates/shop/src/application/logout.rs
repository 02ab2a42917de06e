//! Logout Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::ShopResult;

/// Clears the mirrored session token, revoking the caller's session
pub struct LogoutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ShopResult<()> {
        self.repo.set_session_token(user_id, None).await?;
        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
