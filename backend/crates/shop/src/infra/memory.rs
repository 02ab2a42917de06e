//! In-Memory Repository Implementation
//!
//! Same contracts as the PostgreSQL store, held behind one `RwLock`. Every
//! multi-record write takes the write lock once, which gives the atomicity
//! the traits promise.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{AddressId, ProductId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{address::Address, order::Order, product::Product, user::User};
use crate::domain::repository::{
    AddressRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::domain::value_object::{
    email::Email,
    user_role::{Role, RoleSet},
};
use crate::error::{ShopError, ShopResult};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    products: HashMap<ProductId, Product>,
    addresses: HashMap<AddressId, Address>,
    orders: Vec<Order>,
}

/// In-memory shop store
#[derive(Clone, Default)]
pub struct MemoryShopRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryShopRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `role` to a user's role set; returns `false` for an unknown user
    pub async fn grant_role(&self, user_id: &UserId, role: Role) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(user_id) {
            Some(user) => {
                user.roles = RoleSet::new(user.roles.iter().copied().chain([role]));
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    pub async fn address_count(&self) -> usize {
        self.state.read().await.addresses.len()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryShopRepository {
    async fn create_user(&self, user: &User) -> ShopResult<()> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(ShopError::EmailTaken);
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> ShopResult<Option<User>> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> ShopResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn email_exists(&self, email: &Email) -> ShopResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| &u.email == email))
    }

    async fn list_users(&self) -> ShopResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn set_session_token(&self, user_id: &UserId, token: Option<&str>) -> ShopResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or(ShopError::UserNotFound)?;
        user.session_token = token.map(str::to_string);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn add_cart_item(&self, user_id: &UserId, product_id: &ProductId) -> ShopResult<bool> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or(ShopError::UserNotFound)?;
        if user.cart_items.contains(product_id) {
            return Ok(false);
        }
        user.cart_items.push(*product_id);
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn remove_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> ShopResult<bool> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or(ShopError::UserNotFound)?;
        let before = user.cart_items.len();
        user.cart_items.retain(|id| id != product_id);
        if user.cart_items.len() == before {
            return Ok(false);
        }
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_user(&self, user_id: &UserId) -> ShopResult<bool> {
        Ok(self.state.write().await.users.remove(user_id).is_some())
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for MemoryShopRepository {
    async fn create_product(&self, product: &Product) -> ShopResult<()> {
        let mut state = self.state.write().await;
        state.products.insert(product.product_id, product.clone());
        Ok(())
    }

    async fn find_product(&self, product_id: &ProductId) -> ShopResult<Option<Product>> {
        Ok(self.state.read().await.products.get(product_id).cloned())
    }

    async fn find_products(&self, product_ids: &[ProductId]) -> ShopResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(product_ids
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect())
    }

    async fn list_products(&self) -> ShopResult<Vec<Product>> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn update_product(&self, product: &Product) -> ShopResult<bool> {
        let mut state = self.state.write().await;
        match state.products.get_mut(&product.product_id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, product_id: &ProductId) -> ShopResult<bool> {
        Ok(self.state.write().await.products.remove(product_id).is_some())
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl AddressRepository for MemoryShopRepository {
    async fn create_address(&self, address: &Address) -> ShopResult<()> {
        let mut state = self.state.write().await;
        let owner = state
            .users
            .get_mut(&address.user_id)
            .ok_or(ShopError::UserNotFound)?;
        owner.addresses.push(address.address_id);
        owner.updated_at = Utc::now();
        state.addresses.insert(address.address_id, address.clone());
        Ok(())
    }

    async fn find_address(&self, address_id: &AddressId) -> ShopResult<Option<Address>> {
        Ok(self.state.read().await.addresses.get(address_id).cloned())
    }

    async fn find_addresses(&self, address_ids: &[AddressId]) -> ShopResult<Vec<Address>> {
        let state = self.state.read().await;
        Ok(address_ids
            .iter()
            .filter_map(|id| state.addresses.get(id).cloned())
            .collect())
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for MemoryShopRepository {
    async fn place_order(&self, order: &Order) -> ShopResult<()> {
        let mut state = self.state.write().await;
        let buyer = state
            .users
            .get_mut(&order.user_id)
            .ok_or(ShopError::UserNotFound)?;
        buyer.order_history.push(order.product_id);
        buyer.updated_at = Utc::now();
        state.orders.push(order.clone());
        Ok(())
    }

    async fn list_orders(&self) -> ShopResult<Vec<Order>> {
        Ok(self.state.read().await.orders.clone())
    }
}
