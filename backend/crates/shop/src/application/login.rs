//! Login Use Case
//!
//! Verifies credentials, issues a session token and mirrors it on the user
//! record. The mirrored copy is what makes logout effective: a newer login
//! replaces it and logout clears it.

use std::sync::Arc;

use crate::application::config::ShopConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword, user_role::Role};
use crate::error::{ShopError, ShopResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: UserProfile,
    /// Session token for cookie and body
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
    tokens: TokenService,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self {
            repo,
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    /// Storefront login
    pub async fn execute(&self, input: LoginInput) -> ShopResult<LoginOutput> {
        self.login(input, None).await
    }

    /// Admin console login; credentials must belong to an ADMIN
    pub async fn execute_admin(&self, input: LoginInput) -> ShopResult<LoginOutput> {
        self.login(input, Some(Role::Admin)).await
    }

    async fn login(&self, input: LoginInput, required: Option<Role>) -> ShopResult<LoginOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ShopError::bad_request("Email and password required"));
        }

        let email = Email::new(&input.email).map_err(ShopError::Validation)?;

        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or(ShopError::UserNotFound)?;

        let candidate = RawPassword::candidate(input.password);
        if !user.verify_password(&candidate, self.config.pepper()) {
            return Err(ShopError::InvalidCredentials);
        }

        if let Some(role) = required {
            if !user.roles.permits(role) {
                return Err(ShopError::AdminRequired);
            }
        }

        let token = self.tokens.issue(&user)?;
        self.repo
            .set_session_token(&user.user_id, Some(&token))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            admin_console = required.is_some(),
            "User logged in"
        );

        Ok(LoginOutput {
            user: user.profile(),
            token,
        })
    }
}
