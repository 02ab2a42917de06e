//! Product Entity

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::ProductId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_object::{price::Price, product_status::ProductStatus};

/// Catalog item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    pub product_name: String,
    pub product_description: String,
    pub price: Price,
    /// Image URL as returned by the upload service
    pub image: String,
    pub status: ProductStatus,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated product fields from the admin console
///
/// Used both for creation (everything but `status` required) and for
/// updates (missing or blank fields keep their current value).
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

/// Trimmed value, `None` when missing or blank
fn filled(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_status(raw: &Option<String>) -> AppResult<Option<ProductStatus>> {
    match filled(raw) {
        None => Ok(None),
        Some(code) => ProductStatus::from_code(&code)
            .map(Some)
            .ok_or_else(|| {
                AppError::bad_request("Invalid product status")
                    .with_action("Use IN_STOCK, OUT_OF_STOCK or COMING_SOON")
            }),
    }
}

impl Product {
    /// Validate a draft into a new catalog item
    pub fn create(draft: ProductDraft) -> AppResult<Self> {
        let (Some(product_name), Some(product_description), Some(price), Some(image), Some(category)) = (
            filled(&draft.product_name),
            filled(&draft.product_description),
            draft.price,
            filled(&draft.image),
            filled(&draft.category),
        ) else {
            return Err(AppError::bad_request("All fields are required"));
        };

        let now = Utc::now();
        Ok(Self {
            product_id: ProductId::new(),
            product_name,
            product_description,
            price: Price::new(price)?,
            image,
            status: parse_status(&draft.status)?.unwrap_or_default(),
            category,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the fields the draft actually fills
    ///
    /// Validation happens before any field is touched, so a rejected patch
    /// leaves the product unchanged.
    pub fn apply(&mut self, patch: ProductDraft) -> AppResult<()> {
        let price = patch.price.map(Price::new).transpose()?;
        let status = parse_status(&patch.status)?;

        if let Some(name) = filled(&patch.product_name) {
            self.product_name = name;
        }
        if let Some(description) = filled(&patch.product_description) {
            self.product_description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(image) = filled(&patch.image) {
            self.image = image;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(category) = filled(&patch.category) {
            self.category = category;
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}
