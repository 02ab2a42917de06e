//! Place Order Use Case
//!
//! Every precondition is checked before anything is written:
//!
//! 1. the requester still exists
//! 2. the product exists
//! 3. the address exists and belongs to the requester
//! 4. the product is IN_STOCK
//!
//! The order insert and the order-history append are then one atomic
//! repository call.

use std::sync::Arc;

use kernel::id::{AddressId, ProductId, UserId};

use crate::domain::entity::order::Order;
use crate::domain::repository::{
    AddressRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::domain::value_object::payment::{PaymentMode, PaymentStatus};
use crate::error::{ShopError, ShopResult};

/// Place order input
#[derive(Debug, Clone)]
pub struct PlaceOrderInput {
    pub product_id: ProductId,
    pub address_id: AddressId,
    pub payment_mode: PaymentMode,
    /// Caller-reported status; ignored for cash on delivery
    pub payment_status: Option<PaymentStatus>,
    pub payment_id: Option<String>,
}

pub struct PlaceOrderUseCase<R>
where
    R: UserRepository + ProductRepository + AddressRepository + OrderRepository,
{
    repo: Arc<R>,
}

impl<R> PlaceOrderUseCase<R>
where
    R: UserRepository + ProductRepository + AddressRepository + OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, requester: &UserId, input: PlaceOrderInput) -> ShopResult<Order> {
        let user = self
            .repo
            .find_user(requester)
            .await?
            .ok_or(ShopError::UserNotFound)?;

        let product = self
            .repo
            .find_product(&input.product_id)
            .await?
            .ok_or(ShopError::ProductNotFound)?;

        // A foreign address is reported exactly like a missing one.
        let address = self
            .repo
            .find_address(&input.address_id)
            .await?
            .filter(|address| address.is_owned_by(&user.user_id))
            .ok_or(ShopError::AddressNotFound)?;

        if !product.status.is_orderable() {
            return Err(ShopError::ProductUnavailable);
        }

        let order = Order::new(
            user.user_id,
            address.address_id,
            product.product_id,
            input.payment_mode,
            input.payment_status,
            input.payment_id,
        );

        self.repo.place_order(&order).await?;

        tracing::info!(
            order_id = %order.order_id,
            user_id = %order.user_id,
            product_id = %order.product_id,
            payment_mode = %order.payment_mode,
            payment_status = %order.payment_status,
            "Order placed"
        );

        Ok(order)
    }
}
