//! Session Token Service
//!
//! Tokens are `base64url(claims JSON) "." base64url(HMAC-SHA256)`, the MAC
//! taken over the encoded claims. Verification is stateless: signature and
//! expiry only. Whether the user still exists and still holds this session is
//! decided by the access gates.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::crypto;
use serde::{Deserialize, Serialize};

use crate::application::config::ShopConfig;
use crate::domain::entity::user::User;
use crate::error::{ShopError, ShopResult};

/// Claims carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Owning user
    pub sub: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expires at, unix seconds (exclusive)
    pub exp: i64,
}

/// Issues and verifies session tokens with the configured secret
#[derive(Clone)]
pub struct TokenService {
    config: Arc<ShopConfig>,
}

impl TokenService {
    pub fn new(config: Arc<ShopConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for `user`, valid from now for the configured TTL
    pub fn issue(&self, user: &User) -> ShopResult<String> {
        self.issue_at(user, Utc::now().timestamp())
    }

    /// Issue a token as of `now` (unix seconds); same inputs, same token
    pub fn issue_at(&self, user: &User, now: i64) -> ShopResult<String> {
        let claims = SessionClaims {
            sub: user.user_id,
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            iat: now,
            exp: now.saturating_add(self.config.token_ttl_secs()),
        };

        let json = serde_json::to_vec(&claims)
            .map_err(|e| ShopError::Internal(format!("Claims serialization failed: {}", e)))?;
        let payload = crypto::to_base64url(&json);
        let signature = crypto::hmac_sha256(&self.config.token_secret, payload.as_bytes())
            .map_err(|e| ShopError::Internal(e.to_string()))?;

        Ok(format!("{}.{}", payload, crypto::to_base64url(&signature)))
    }

    /// Verify signature and expiry against the current time
    pub fn verify(&self, token: &str) -> ShopResult<SessionClaims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify signature and expiry as of `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> ShopResult<SessionClaims> {
        let (payload, signature) = token.split_once('.').ok_or(ShopError::InvalidToken)?;
        let signature = crypto::from_base64url(signature).map_err(|_| ShopError::InvalidToken)?;

        if !crypto::verify_hmac_sha256(&self.config.token_secret, payload.as_bytes(), &signature)
        {
            return Err(ShopError::InvalidToken);
        }

        let json = crypto::from_base64url(payload).map_err(|_| ShopError::InvalidToken)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| ShopError::InvalidToken)?;

        if now >= claims.exp {
            return Err(ShopError::InvalidToken);
        }

        Ok(claims)
    }
}
