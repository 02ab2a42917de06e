//! Shop Error Types
//!
//! Shop-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Shop-specific result type alias
pub type ShopResult<T> = Result<T, ShopError>;

/// Shop-specific error variants
#[derive(Debug, Error)]
pub enum ShopError {
    /// No session token in cookie or Authorization header
    #[error("Unauthorized: token not found")]
    MissingToken,

    /// Signature, format or expiry check failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token verifies but is no longer the user's active session
    #[error("Session is no longer active")]
    SessionRevoked,

    /// Wrong password
    #[error("Invalid password")]
    InvalidCredentials,

    /// Valid session without the ADMIN role
    #[error("Admin access required")]
    AdminRequired,

    #[error("User not found")]
    UserNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Address not found")]
    AddressNotFound,

    /// Cart removal for a product that is not in the cart
    #[error("Product not found in cart")]
    NotInCart,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Product already in cart")]
    AlreadyInCart,

    /// Ordering a product whose status is not IN_STOCK
    #[error("Product is not available for ordering")]
    ProductUnavailable,

    /// Input rejected by a value object
    #[error(transparent)]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Shorthand for a plain 400 with a message
    pub fn bad_request(message: impl Into<String>) -> Self {
        ShopError::Validation(AppError::bad_request(message.into()))
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::MissingToken
            | ShopError::InvalidToken
            | ShopError::SessionRevoked
            | ShopError::InvalidCredentials => ErrorKind::Unauthorized,
            ShopError::AdminRequired => ErrorKind::Forbidden,
            ShopError::UserNotFound
            | ShopError::ProductNotFound
            | ShopError::AddressNotFound
            | ShopError::NotInCart => ErrorKind::NotFound,
            ShopError::EmailTaken | ShopError::AlreadyInCart | ShopError::ProductUnavailable => {
                ErrorKind::Conflict
            }
            ShopError::Validation(err) => err.kind(),
            ShopError::Database(_) | ShopError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Persistence details stay in the logs; callers only see a generic message.
    pub fn into_app_error(self) -> AppError {
        match self {
            ShopError::Validation(err) => err,
            ShopError::Database(err) => AppError::from(err),
            ShopError::Internal(msg) => {
                AppError::internal("Something went wrong on server").with_source(InternalDetail(msg))
            }
            ShopError::MissingToken | ShopError::InvalidToken | ShopError::SessionRevoked => {
                AppError::new(ErrorKind::Unauthorized, self.to_string())
                    .with_action("Log in again to continue")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ShopError::Database(e) => {
                tracing::error!(error = %e, "Shop database error");
            }
            ShopError::Internal(msg) => {
                tracing::error!(message = %msg, "Shop internal error");
            }
            ShopError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            ShopError::SessionRevoked => {
                tracing::warn!("Signed-out session token presented");
            }
            ShopError::AdminRequired => {
                tracing::warn!("Admin route reached without ADMIN role");
            }
            _ => {
                tracing::debug!(error = %self, "Shop error");
            }
        }
    }
}

/// Source wrapper so internal messages survive in `AppError`'s debug output
#[derive(Debug, Error)]
#[error("{0}")]
struct InternalDetail(String);

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
