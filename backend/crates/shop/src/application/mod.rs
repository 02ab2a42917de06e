//! Application Layer
//!
//! Use cases and application services.

pub mod access;
pub mod address;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod login;
pub mod logout;
pub mod mailer;
pub mod place_order;
pub mod register;
pub mod token;
pub mod user_details;

// Re-exports
pub use access::{ADMIN_ONLY, AUTHENTICATED, AccessControl, CurrentUser, Gate, RequestContext};
pub use address::AddAddressUseCase;
pub use admin::AdminUseCase;
pub use cart::CartUseCase;
pub use catalog::CatalogUseCase;
pub use config::ShopConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use mailer::{LogMailer, MailQueue, WelcomeEmail, WelcomeMailer};
pub use place_order::{PlaceOrderInput, PlaceOrderUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{SessionClaims, TokenService};
pub use user_details::UserDetailsUseCase;
