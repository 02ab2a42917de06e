//! Shop Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, access gates, session tokens, mail queue
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Registration and login with email + password, welcome email on signup
//! - Cart, addresses and single-product orders (cash on delivery or online)
//! - Public catalog and an admin surface for products, users and orders
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned in any payload
//! - Session tokens are HMAC-signed and mirrored on the user record, so
//!   logging out revokes them before they expire
//! - Admin routes require the ADMIN role on the stored user, not the token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ShopConfig;
pub use application::mailer::{LogMailer, MailQueue};
pub use error::{ShopError, ShopResult};
pub use infra::memory::MemoryShopRepository;
pub use infra::postgres::PgShopRepository;
pub use presentation::router::{shop_router, shop_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
