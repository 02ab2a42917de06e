//! Payment Mode and Status
//!
//! Cash on delivery is always recorded as PENDING: payment happens at the
//! door, after the order exists. Online orders carry whatever the payment
//! callback reported, PENDING when nothing was reported yet.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cod,
    Online,
}

impl PaymentMode {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentMode::Cod => "COD",
            PaymentMode::Online => "ONLINE",
        }
    }

    /// Case-insensitive parse of the caller's payment mode
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "COD" => Ok(PaymentMode::Cod),
            "ONLINE" => Ok(PaymentMode::Online),
            _ => Err(AppError::bad_request("Invalid payment mode")
                .with_action("Use COD or ONLINE")),
        }
    }

    /// Status to persist for an order paid this way
    pub fn settle(&self, requested: Option<PaymentStatus>) -> PaymentStatus {
        match self {
            PaymentMode::Cod => PaymentStatus::Pending,
            PaymentMode::Online => requested.unwrap_or(PaymentStatus::Pending),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
        }
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(AppError::bad_request("Invalid payment status")),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(PaymentMode::parse("COD").unwrap(), PaymentMode::Cod);
        assert_eq!(PaymentMode::parse("online").unwrap(), PaymentMode::Online);
        assert!(PaymentMode::parse("cheque").is_err());
    }

    #[test]
    fn test_cod_is_always_pending() {
        for requested in [
            None,
            Some(PaymentStatus::Paid),
            Some(PaymentStatus::Failed),
            Some(PaymentStatus::Pending),
        ] {
            assert_eq!(PaymentMode::Cod.settle(requested), PaymentStatus::Pending);
        }
    }

    #[test]
    fn test_online_takes_reported_status() {
        assert_eq!(PaymentMode::Online.settle(None), PaymentStatus::Pending);
        assert_eq!(
            PaymentMode::Online.settle(Some(PaymentStatus::Paid)),
            PaymentStatus::Paid
        );
    }
}
