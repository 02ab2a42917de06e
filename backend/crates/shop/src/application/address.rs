//! Add Address Use Case

use std::sync::Arc;

use crate::application::config::ShopConfig;
use crate::domain::entity::address::{Address, AddressDraft};
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::AddressRepository;
use crate::error::{ShopError, ShopResult};

pub struct AddAddressUseCase<R>
where
    R: AddressRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
}

impl<R> AddAddressUseCase<R>
where
    R: AddressRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate and store an address for `owner`
    ///
    /// A blank name defaults to the owner's full name.
    pub async fn execute(&self, owner: &UserProfile, draft: AddressDraft) -> ShopResult<Address> {
        let address = Address::create(
            owner.user_id,
            draft,
            &owner.full_name(),
            &self.config.default_country,
        )
        .map_err(ShopError::Validation)?;

        self.repo.create_address(&address).await?;

        tracing::info!(
            user_id = %owner.user_id,
            address_id = %address.address_id,
            "Address added"
        );

        Ok(address)
    }
}
