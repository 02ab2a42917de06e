//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ShopAppState;
pub use middleware::{AccessState, require_admin, require_user};
pub use router::{shop_router, shop_router_generic};
