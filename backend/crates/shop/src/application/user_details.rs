//! User Details Use Case
//!
//! Resolves the reference lists on a user record into full records. A
//! reference whose target has since been deleted is dropped from the view.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use kernel::id::{AddressId, ProductId, UserId};

use crate::domain::entity::address::Address;
use crate::domain::entity::product::Product;
use crate::domain::entity::user::UserDetails;
use crate::domain::repository::{AddressRepository, ProductRepository, UserRepository};
use crate::error::{ShopError, ShopResult};

pub struct UserDetailsUseCase<R>
where
    R: UserRepository + ProductRepository + AddressRepository,
{
    repo: Arc<R>,
}

impl<R> UserDetailsUseCase<R>
where
    R: UserRepository + ProductRepository + AddressRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ShopResult<UserDetails> {
        let user = self
            .repo
            .find_user(user_id)
            .await?
            .ok_or(ShopError::UserNotFound)?;

        let mut wanted: Vec<ProductId> = user.cart_items.clone();
        wanted.extend(user.order_history.iter().copied());
        wanted.sort_by_key(|id| *id.as_uuid());
        wanted.dedup();

        let products: HashMap<ProductId, Product> = self
            .repo
            .find_products(&wanted)
            .await?
            .into_iter()
            .map(|product| (product.product_id, product))
            .collect();

        let addresses: HashMap<AddressId, Address> = self
            .repo
            .find_addresses(&user.addresses)
            .await?
            .into_iter()
            .map(|address| (address.address_id, address))
            .collect();

        let cart = resolve(&user.cart_items, &products);
        let history = resolve(&user.order_history, &products);
        let addresses = resolve(&user.addresses, &addresses);

        Ok(UserDetails::assemble(user.profile(), cart, addresses, history))
    }
}

/// Records for `ids` in list order, repeats kept, missing ones skipped
fn resolve<K, V>(ids: &[K], records: &HashMap<K, V>) -> Vec<V>
where
    K: Eq + Hash,
    V: Clone,
{
    ids.iter().filter_map(|id| records.get(id).cloned()).collect()
}
