//! Order Entity
//!
//! One purchase of a single product, shipped to one of the buyer's addresses.

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, OrderId, ProductId, UserId};
use serde::Serialize;

use crate::domain::value_object::payment::{PaymentMode, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub order_id: OrderId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "address")]
    pub address_id: AddressId,
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    /// Gateway transaction id for online payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// New order; the payment status is settled from the mode
    pub fn new(
        user_id: UserId,
        address_id: AddressId,
        product_id: ProductId,
        payment_mode: PaymentMode,
        requested_status: Option<PaymentStatus>,
        payment_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            order_id: OrderId::new(),
            user_id,
            address_id,
            product_id,
            payment_mode,
            payment_status: payment_mode.settle(requested_status),
            payment_id: payment_id.filter(|id| !id.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cod_order_is_pending() {
        let order = Order::new(
            UserId::new(),
            AddressId::new(),
            ProductId::new(),
            PaymentMode::Cod,
            Some(PaymentStatus::Paid),
            None,
        );
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_serialized_shape() {
        let order = Order::new(
            UserId::new(),
            AddressId::new(),
            ProductId::new(),
            PaymentMode::Online,
            Some(PaymentStatus::Paid),
            Some("pay_123".to_string()),
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["payment_mode"], "ONLINE");
        assert_eq!(json["payment_status"], "PAID");
        assert_eq!(json["payment_id"], "pay_123");
        assert_eq!(json["product"], order.product_id.to_string());
    }
}
