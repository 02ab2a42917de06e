//! Value Object Module

pub mod email;
pub mod payment;
pub mod phone_number;
pub mod pin_code;
pub mod price;
pub mod product_status;
pub mod user_password;
pub mod user_role;
