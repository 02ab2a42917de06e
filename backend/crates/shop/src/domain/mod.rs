//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{address::Address, order::Order, product::Product, user::User};
pub use repository::{
    AddressRepository, OrderRepository, ProductRepository, ShopRepository, UserRepository,
};
