//! User Entity
//!
//! `User` is the stored record, password hash and mirrored session token
//! included. Anything that leaves the crate goes through `UserProfile`
//! (references only) or `UserDetails` (references expanded), neither of which
//! carries credentials.

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, ProductId, UserId};
use serde::Serialize;

use crate::domain::entity::{address::Address, product::Product};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    user_role::RoleSet,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across users, compared case-sensitively
    pub email: Email,
    pub profile_image: String,
    pub roles: RoleSet,
    pub password: UserPassword,
    /// Token issued by the most recent login; `None` once logged out
    pub session_token: Option<String>,
    pub cart_items: Vec<ProductId>,
    pub addresses: Vec<AddressId>,
    /// Products ordered, one entry per order
    pub order_history: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user with the default role set
    pub fn new(first_name: String, last_name: String, email: Email, password: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            first_name,
            last_name,
            email,
            profile_image: String::new(),
            roles: RoleSet::default(),
            password,
            session_token: None,
            cart_items: Vec::new(),
            addresses: Vec::new(),
            order_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn verify_password(&self, candidate: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(candidate, pepper)
    }

    /// Whether `token` is the session currently mirrored on this record
    pub fn holds_session(&self, token: &str) -> bool {
        self.session_token.as_deref().is_some_and(|current| {
            platform::crypto::constant_time_eq(current.as_bytes(), token.as_bytes())
        })
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
            roles: self.roles.clone(),
            cart_items: self.cart_items.clone(),
            addresses: self.addresses.clone(),
            order_history: self.order_history.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Credential-free view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub profile_image: String,
    pub roles: RoleSet,
    pub cart_items: Vec<ProductId>,
    #[serde(rename = "address")]
    pub addresses: Vec<AddressId>,
    #[serde(rename = "buying_products")]
    pub order_history: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Profile with cart, address and order references resolved to records
#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    #[serde(rename = "_id")]
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub profile_image: String,
    pub roles: RoleSet,
    pub cart_items: Vec<Product>,
    #[serde(rename = "address")]
    pub addresses: Vec<Address>,
    #[serde(rename = "buying_products")]
    pub order_history: Vec<Product>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDetails {
    pub fn assemble(
        profile: UserProfile,
        cart_items: Vec<Product>,
        addresses: Vec<Address>,
        order_history: Vec<Product>,
    ) -> Self {
        Self {
            user_id: profile.user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            profile_image: profile.profile_image,
            roles: profile.roles,
            cart_items,
            addresses,
            order_history,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            Email::new("jane@x.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert_eq!(user.roles, RoleSet::default());
        assert!(user.session_token.is_none());
        assert!(user.cart_items.is_empty());
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_holds_session() {
        let mut user = user();
        assert!(!user.holds_session("abc"));
        user.session_token = Some("abc".to_string());
        assert!(user.holds_session("abc"));
        assert!(!user.holds_session("abd"));
        assert!(!user.holds_session("ab"));
    }

    #[test]
    fn test_profile_has_no_credentials() {
        let user = user();
        let json = serde_json::to_value(user.profile()).unwrap();
        assert_eq!(json["email"], "jane@x.com");
        assert_eq!(json["roles"], serde_json::json!(["USER"]));
        assert!(json.get("password").is_none());
        assert!(json.get("session_token").is_none());
        assert!(json.get("_id").is_some());
    }
}
