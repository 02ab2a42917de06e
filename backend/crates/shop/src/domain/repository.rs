//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer. Method names are unique across the traits so one type can implement
//! all of them without ambiguous calls.

use kernel::id::{AddressId, ProductId, UserId};

use crate::domain::entity::{address::Address, order::Order, product::Product, user::User};
use crate::domain::value_object::email::Email;
use crate::error::ShopResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; `EmailTaken` if the email is already registered
    async fn create_user(&self, user: &User) -> ShopResult<()>;

    async fn find_user(&self, user_id: &UserId) -> ShopResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> ShopResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> ShopResult<bool>;

    async fn list_users(&self) -> ShopResult<Vec<User>>;

    /// Mirror (or clear, with `None`) the user's active session token
    async fn set_session_token(&self, user_id: &UserId, token: Option<&str>) -> ShopResult<()>;

    /// Append to the cart unless already present
    ///
    /// Returns `false` when the product was already in the cart. The check
    /// and the append are a single atomic step.
    async fn add_cart_item(&self, user_id: &UserId, product_id: &ProductId) -> ShopResult<bool>;

    /// Returns `false` when the product was not in the cart
    async fn remove_cart_item(&self, user_id: &UserId, product_id: &ProductId)
    -> ShopResult<bool>;

    /// Returns `false` when no such user existed
    async fn delete_user(&self, user_id: &UserId) -> ShopResult<bool>;
}

/// Product catalog repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn create_product(&self, product: &Product) -> ShopResult<()>;

    async fn find_product(&self, product_id: &ProductId) -> ShopResult<Option<Product>>;

    /// Products for the given ids; missing ids are skipped
    async fn find_products(&self, product_ids: &[ProductId]) -> ShopResult<Vec<Product>>;

    async fn list_products(&self) -> ShopResult<Vec<Product>>;

    /// Returns `false` when no such product existed
    async fn update_product(&self, product: &Product) -> ShopResult<bool>;

    /// Returns `false` when no such product existed
    async fn delete_product(&self, product_id: &ProductId) -> ShopResult<bool>;
}

/// Address repository trait
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    /// Insert the address and append it to its owner's address list, atomically
    async fn create_address(&self, address: &Address) -> ShopResult<()>;

    async fn find_address(&self, address_id: &AddressId) -> ShopResult<Option<Address>>;

    /// Addresses for the given ids; missing ids are skipped
    async fn find_addresses(&self, address_ids: &[AddressId]) -> ShopResult<Vec<Address>>;
}

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Insert the order and append its product to the buyer's order history,
    /// atomically: either both writes happen or neither does
    async fn place_order(&self, order: &Order) -> ShopResult<()>;

    async fn list_orders(&self) -> ShopResult<Vec<Order>>;
}

/// Everything the HTTP layer needs from one store
pub trait ShopRepository:
    UserRepository
    + ProductRepository
    + AddressRepository
    + OrderRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> ShopRepository for T where
    T: UserRepository
        + ProductRepository
        + AddressRepository
        + OrderRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
