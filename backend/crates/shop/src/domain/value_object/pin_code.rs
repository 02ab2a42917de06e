//! PIN Code Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Six digit Indian postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinCode(String);

impl PinCode {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let raw = raw.as_ref().trim();

        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::bad_request("Invalid Indian PIN code")
                .with_action("Enter a 6 digit PIN code"));
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

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_code() {
        assert!(PinCode::new("560001").is_ok());
        assert!(PinCode::new("56000").is_err());
        assert!(PinCode::new("5600011").is_err());
        assert!(PinCode::new("56O001").is_err());
    }
}
