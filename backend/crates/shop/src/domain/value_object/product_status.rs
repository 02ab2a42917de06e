//! Product Availability
//!
//! Set by hand from the admin console; never derived from order volume.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    InStock,
    OutOfStock,
    ComingSoon,
}

impl ProductStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ProductStatus::InStock => "IN_STOCK",
            ProductStatus::OutOfStock => "OUT_OF_STOCK",
            ProductStatus::ComingSoon => "COMING_SOON",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "IN_STOCK" => Some(ProductStatus::InStock),
            "OUT_OF_STOCK" => Some(ProductStatus::OutOfStock),
            "COMING_SOON" => Some(ProductStatus::ComingSoon),
            _ => None,
        }
    }

    /// Only IN_STOCK products can be ordered
    #[inline]
    pub const fn is_orderable(&self) -> bool {
        matches!(self, ProductStatus::InStock)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
