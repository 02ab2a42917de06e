//! Phone Number Value Object
//!
//! Indian mobile numbers: ten digits, the first one 6-9.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let raw = raw.as_ref().trim();

        let valid = raw.len() == 10
            && raw.bytes().all(|b| b.is_ascii_digit())
            && matches!(raw.as_bytes()[0], b'6'..=b'9');

        if !valid {
            return Err(AppError::bad_request("Invalid Indian phone number")
                .with_action("Enter a 10 digit mobile number starting with 6-9"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(PhoneNumber::new("9876543210").is_ok());
        assert!(PhoneNumber::new("6000000000").is_ok());
        assert_eq!(PhoneNumber::new(" 7012345678 ").unwrap().as_str(), "7012345678");
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("5876543210").is_err());
        assert!(PhoneNumber::new("987654321").is_err());
        assert!(PhoneNumber::new("98765432101").is_err());
        assert!(PhoneNumber::new("98765o3210").is_err());
        assert!(PhoneNumber::new("+919876543210").is_err());
    }
}
