//! Catalog Use Case
//!
//! Public product reads plus the admin-side product maintenance.

use std::sync::Arc;

use kernel::id::ProductId;

use crate::domain::entity::product::{Product, ProductDraft};
use crate::domain::repository::ProductRepository;
use crate::error::{ShopError, ShopResult};

pub struct CatalogUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CatalogUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, product_id: &ProductId) -> ShopResult<Product> {
        self.repo
            .find_product(product_id)
            .await?
            .ok_or(ShopError::ProductNotFound)
    }

    pub async fn list(&self) -> ShopResult<Vec<Product>> {
        self.repo.list_products().await
    }

    pub async fn add(&self, draft: ProductDraft) -> ShopResult<Product> {
        let product = Product::create(draft).map_err(ShopError::Validation)?;
        self.repo.create_product(&product).await?;

        tracing::info!(product_id = %product.product_id, name = %product.product_name, "Product added");
        Ok(product)
    }

    /// Apply the filled fields of `patch`; blank fields keep their value
    pub async fn update(&self, product_id: &ProductId, patch: ProductDraft) -> ShopResult<Product> {
        let mut product = self.get(product_id).await?;
        product.apply(patch).map_err(ShopError::Validation)?;

        if !self.repo.update_product(&product).await? {
            return Err(ShopError::ProductNotFound);
        }

        tracing::info!(product_id = %product_id, "Product updated");
        Ok(product)
    }

    /// Delete and return the removed product
    pub async fn delete(&self, product_id: &ProductId) -> ShopResult<Product> {
        let product = self.get(product_id).await?;

        if !self.repo.delete_product(product_id).await? {
            return Err(ShopError::ProductNotFound);
        }

        tracing::info!(product_id = %product_id, "Product deleted");
        Ok(product)
    }
}
