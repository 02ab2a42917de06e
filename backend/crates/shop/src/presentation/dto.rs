//! API DTOs (Data Transfer Objects)
//!
//! Request bodies keep every field optional so a missing field is reported
//! with the same 400 message as a blank one, not as a JSON rejection.

use std::str::FromStr;

use kernel::id::{AddressId, Id, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{LoginInput, PlaceOrderInput, RegisterInput};
use crate::domain::entity::{address::AddressDraft, product::ProductDraft, user::UserProfile};
use crate::domain::value_object::payment::{PaymentMode, PaymentStatus};
use crate::error::{ShopError, ShopResult};

/// Parse a path identifier; malformed ids are a 400
pub fn parse_id<T>(raw: &str) -> ShopResult<Id<T>> {
    Id::from_str(raw).map_err(|_| ShopError::bad_request("Please provide a valid id"))
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login response, merged into the envelope's top level
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
}

// ============================================================================
// Address
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddAddressRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub pin_code: Option<String>,
    pub house_no: Option<String>,
    pub area: Option<String>,
    pub landmark: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl From<AddAddressRequest> for AddressDraft {
    fn from(req: AddAddressRequest) -> Self {
        Self {
            name: req.name,
            phone_number: req.phone_number,
            country: req.country,
            pin_code: req.pin_code,
            house_no: req.house_no,
            area: req.area,
            landmark: req.landmark,
            city: req.city,
            state: req.state,
        }
    }
}

// ============================================================================
// Order
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    /// Address id
    pub address: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_status: Option<String>,
    pub payment_id: Option<String>,
}

impl CreateOrderRequest {
    /// Resolve the body into use case input for `product_id`
    ///
    /// An address id that does not parse cannot exist, so it is reported
    /// exactly like an unknown one.
    pub fn into_input(self, product_id: ProductId) -> ShopResult<PlaceOrderInput> {
        let address = filled(self.address)
            .ok_or_else(|| ShopError::bad_request("Address is required"))?;
        let address_id =
            AddressId::from_str(&address).map_err(|_| ShopError::AddressNotFound)?;

        let payment_mode = filled(self.payment_mode)
            .ok_or_else(|| ShopError::bad_request("Payment mode is required"))?;
        let payment_mode = PaymentMode::parse(&payment_mode).map_err(ShopError::Validation)?;

        let payment_status = match (payment_mode, filled(self.payment_status)) {
            (PaymentMode::Cod, _) | (_, None) => None,
            (_, Some(raw)) => Some(PaymentStatus::parse(&raw).map_err(ShopError::Validation)?),
        };

        Ok(PlaceOrderInput {
            product_id,
            address_id,
            payment_mode,
            payment_status,
            payment_id: self.payment_id,
        })
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRequest {
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        Self {
            product_name: req.product_name,
            product_description: req.product_description,
            price: req.price,
            image: req.image,
            status: req.status,
            category: req.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;
    use serde_json::json;

    fn order_body(value: serde_json::Value) -> CreateOrderRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cod_ignores_reported_status() {
        let address = AddressId::new();
        let input = order_body(json!({
            "address": address.to_string(),
            "payment_mode": "cod",
            "payment_status": "PAID"
        }))
        .into_input(ProductId::new())
        .unwrap();

        assert_eq!(input.payment_mode, PaymentMode::Cod);
        assert_eq!(input.payment_status, None);
        assert_eq!(input.address_id, address);
    }

    #[test]
    fn test_online_keeps_reported_status() {
        let input = order_body(json!({
            "address": AddressId::new().to_string(),
            "payment_mode": "ONLINE",
            "payment_status": "paid",
            "payment_id": "pay_123"
        }))
        .into_input(ProductId::new())
        .unwrap();

        assert_eq!(input.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(input.payment_id.as_deref(), Some("pay_123"));
    }

    #[test]
    fn test_missing_address_is_bad_request() {
        let err = order_body(json!({ "payment_mode": "COD" }))
            .into_input(ProductId::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_garbage_address_is_not_found() {
        let err = order_body(json!({ "address": "nope", "payment_mode": "COD" }))
            .into_input(ProductId::new())
            .unwrap_err();
        assert!(matches!(err, ShopError::AddressNotFound));
    }

    #[test]
    fn test_unknown_payment_mode_is_bad_request() {
        let err = order_body(json!({
            "address": AddressId::new().to_string(),
            "payment_mode": "BARTER"
        }))
        .into_input(ProductId::new())
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_product_price_accepts_number_or_string() {
        let a: ProductRequest = serde_json::from_value(json!({ "price": 499.5 })).unwrap();
        let b: ProductRequest = serde_json::from_value(json!({ "price": "499.50" })).unwrap();
        assert_eq!(a.price, b.price);
    }

    #[test]
    fn test_parse_id() {
        let id = ProductId::new();
        assert_eq!(parse_id::<kernel::id::markers::Product>(&id.to_string()).unwrap(), id);
        assert_eq!(
            parse_id::<kernel::id::markers::Product>("123").unwrap_err().kind(),
            ErrorKind::BadRequest
        );
    }
}
