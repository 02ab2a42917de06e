//! Price Value Object

use kernel::error::app_error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest amount a `NUMERIC(12, 2)` column holds
const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Product price in rupees; at least 1, at most two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> AppResult<Self> {
        if amount < Decimal::ONE {
            return Err(AppError::bad_request("Price must be at least 1"));
        }
        if amount > MAX_PRICE {
            return Err(AppError::bad_request("Price is too large")
                .with_action("Use at most 9999999999.99"));
        }
        if amount.normalize().scale() > 2 {
            return Err(AppError::bad_request("Price can have at most 2 decimal places"));
        }

        // Same shape the column hands back
        let mut amount = amount;
        amount.rescale(2);
        Ok(Self(amount))
    }

    pub fn from_db(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bounds() {
        assert!(Price::new(Decimal::ONE).is_ok());
        assert!(Price::new(Decimal::ZERO).is_err());
        assert!(Price::new(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_price_fits_storage_column() {
        assert_eq!(MAX_PRICE, Decimal::new(999_999_999_999, 2));
        assert!(Price::new(MAX_PRICE).is_ok());
        assert!(Price::new(Decimal::new(10_000_000_000, 0)).is_err());
    }

    #[test]
    fn test_price_rejects_sub_paisa_amounts() {
        assert!(Price::new(Decimal::new(19_999, 3)).is_err());
        assert!(Price::new(Decimal::new(19_990, 3)).is_ok());
        assert!(Price::new(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_price_is_stored_with_two_decimals() {
        let whole = Price::new(Decimal::new(499, 0)).unwrap();
        assert_eq!(whole.to_string(), "499.00");
        let padded = Price::new(Decimal::new(19_990, 3)).unwrap();
        assert_eq!(padded.to_string(), "19.99");
    }

    #[test]
    fn test_price_serializes_as_string() {
        let price = Price::new(Decimal::new(49950, 2)).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"499.50\"");
    }
}
