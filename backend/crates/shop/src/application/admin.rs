//! Admin Use Case
//!
//! User and order administration. Product maintenance lives in the catalog.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{order::Order, user::UserProfile};
use crate::domain::repository::{OrderRepository, UserRepository};
use crate::error::{ShopError, ShopResult};

pub struct AdminUseCase<R>
where
    R: UserRepository + OrderRepository,
{
    repo: Arc<R>,
}

impl<R> AdminUseCase<R>
where
    R: UserRepository + OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_users(&self) -> ShopResult<Vec<UserProfile>> {
        let users = self.repo.list_users().await?;
        Ok(users.iter().map(|user| user.profile()).collect())
    }

    /// Remove a user record outright
    ///
    /// Their addresses and orders stay; orders keep referencing the id.
    pub async fn delete_user(&self, user_id: &UserId) -> ShopResult<()> {
        if !self.repo.delete_user(user_id).await? {
            return Err(ShopError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    pub async fn list_orders(&self) -> ShopResult<Vec<Order>> {
        self.repo.list_orders().await
    }
}
