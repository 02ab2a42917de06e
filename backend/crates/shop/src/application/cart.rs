//! Cart Use Case

use std::sync::Arc;

use kernel::id::{ProductId, UserId};

use crate::domain::repository::{ProductRepository, UserRepository};
use crate::error::{ShopError, ShopResult};

/// Adds and removes cart references
pub struct CartUseCase<R>
where
    R: UserRepository + ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CartUseCase<R>
where
    R: UserRepository + ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add `product_id` to the cart; returns the updated cart
    ///
    /// A product already in the cart is rejected, not merged.
    pub async fn add(&self, user_id: &UserId, product_id: &ProductId) -> ShopResult<Vec<ProductId>> {
        if self.repo.find_product(product_id).await?.is_none() {
            return Err(ShopError::ProductNotFound);
        }

        if !self.repo.add_cart_item(user_id, product_id).await? {
            return Err(ShopError::AlreadyInCart);
        }

        tracing::debug!(user_id = %user_id, product_id = %product_id, "Added to cart");
        self.cart(user_id).await
    }

    /// Remove `product_id` from the cart; returns the updated cart
    pub async fn remove(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> ShopResult<Vec<ProductId>> {
        if !self.repo.remove_cart_item(user_id, product_id).await? {
            return Err(ShopError::NotInCart);
        }

        tracing::debug!(user_id = %user_id, product_id = %product_id, "Removed from cart");
        self.cart(user_id).await
    }

    async fn cart(&self, user_id: &UserId) -> ShopResult<Vec<ProductId>> {
        self.repo
            .find_user(user_id)
            .await?
            .map(|user| user.cart_items)
            .ok_or(ShopError::UserNotFound)
    }
}
