//! Address Entity
//!
//! A shipping address owned by exactly one user.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{AddressId, UserId};
use serde::Serialize;

use crate::domain::value_object::{phone_number::PhoneNumber, pin_code::PinCode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub address_id: AddressId,
    #[serde(rename = "user")]
    pub user_id: UserId,
    pub name: String,
    pub phone_number: PhoneNumber,
    pub country: String,
    pub pin_code: PinCode,
    pub house_no: String,
    pub area: String,
    pub landmark: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated address fields as submitted
#[derive(Debug, Clone, Default)]
pub struct AddressDraft {
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

fn filled(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Address {
    /// Validate a draft for `owner`
    ///
    /// A blank name falls back to `fallback_name` (the owner's full name); a
    /// blank country falls back to `default_country`. Every other required
    /// field must be filled before formats are checked.
    pub fn create(
        owner: UserId,
        draft: AddressDraft,
        fallback_name: &str,
        default_country: &str,
    ) -> AppResult<Self> {
        let name = filled(draft.name).or_else(|| filled(Some(fallback_name.to_string())));

        let (Some(name), Some(phone), Some(pin), Some(house_no), Some(area), Some(city), Some(state)) = (
            name,
            filled(draft.phone_number),
            filled(draft.pin_code),
            filled(draft.house_no),
            filled(draft.area),
            filled(draft.city),
            filled(draft.state),
        ) else {
            return Err(AppError::bad_request("All required fields must be filled"));
        };

        let now = Utc::now();
        Ok(Self {
            address_id: AddressId::new(),
            user_id: owner,
            name,
            phone_number: PhoneNumber::new(phone)?,
            country: filled(draft.country).unwrap_or_else(|| default_country.to_string()),
            pin_code: PinCode::new(pin)?,
            house_no,
            area,
            landmark: filled(draft.landmark).unwrap_or_default(),
            city,
            state,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AddressDraft {
        AddressDraft {
            name: None,
            phone_number: Some("9876543210".to_string()),
            country: None,
            pin_code: Some("560001".to_string()),
            house_no: Some("12B".to_string()),
            area: Some("Indiranagar".to_string()),
            landmark: None,
            city: Some("Bengaluru".to_string()),
            state: Some("Karnataka".to_string()),
        }
    }

    #[test]
    fn test_blank_name_defaults_to_owner() {
        let owner = UserId::new();
        let address = Address::create(owner, draft(), "Jane Doe", "India").unwrap();
        assert_eq!(address.name, "Jane Doe");
        assert_eq!(address.country, "India");
        assert_eq!(address.landmark, "");
        assert!(address.is_owned_by(&owner));
        assert!(!address.is_owned_by(&UserId::new()));
    }

    #[test]
    fn test_missing_required_field() {
        let mut missing = draft();
        missing.city = Some("  ".to_string());
        let err = Address::create(UserId::new(), missing, "Jane Doe", "India").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_blank_name_without_fallback() {
        let err = Address::create(UserId::new(), draft(), " ", "India").unwrap_err();
        assert_eq!(err.message(), "All required fields must be filled");
    }

    #[test]
    fn test_format_checks() {
        let mut bad_phone = draft();
        bad_phone.phone_number = Some("12345".to_string());
        assert!(Address::create(UserId::new(), bad_phone, "Jane", "India").is_err());

        let mut bad_pin = draft();
        bad_pin.pin_code = Some("ABC123".to_string());
        assert!(Address::create(UserId::new(), bad_pin, "Jane", "India").is_err());
    }
}
