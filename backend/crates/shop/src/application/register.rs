//! Register Use Case
//!
//! Creates a new user account and queues the welcome mail.

use std::sync::Arc;

use crate::application::config::ShopConfig;
use crate::application::mailer::{MailQueue, WelcomeEmail};
use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{ShopError, ShopResult};

/// Register input
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
    mail: MailQueue,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>, mail: MailQueue) -> Self {
        Self { repo, config, mail }
    }

    pub async fn execute(&self, input: RegisterInput) -> ShopResult<UserProfile> {
        let first_name = input.first_name.trim();
        let last_name = input.last_name.trim();

        if [first_name, last_name, input.email.as_str(), input.password.as_str()]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ShopError::bad_request("All fields are required"));
        }

        let email = Email::new(&input.email).map_err(ShopError::Validation)?;

        if self.repo.email_exists(&email).await? {
            return Err(ShopError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password).map_err(ShopError::Validation)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| ShopError::Internal(e.to_string()))?;

        let user = User::new(
            first_name.to_string(),
            last_name.to_string(),
            email,
            password,
        );

        // The unique index still rejects a concurrent registration of the
        // same email that slipped past the check above.
        self.repo.create_user(&user).await?;

        tracing::info!(user_id = %user.user_id, email = %user.email, "User registered");

        self.mail.enqueue(WelcomeEmail {
            to: user.email.clone(),
            first_name: user.first_name.clone(),
        });

        Ok(user.profile())
    }
}
