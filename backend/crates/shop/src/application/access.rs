//! Access Control Pipeline
//!
//! A request is admitted by running an ordered list of gates over a
//! [`RequestContext`]. Each gate either returns the context enriched with what
//! it established or fails, and the first failure ends the run:
//!
//! 1. [`Gate::Authenticate`]: a token was presented and its signature and
//!    expiry verify. Fails uniformly with 401 whatever the token contains.
//! 2. [`Gate::ResolveUser`]: the token's user still exists (404 otherwise)
//!    and the token is the session mirrored on the user record (401 once
//!    logged out or superseded by a newer login).
//! 3. [`Gate::RequireRole`]: the resolved user holds the role (403).

use std::sync::Arc;

use crate::application::config::ShopConfig;
use crate::application::token::{SessionClaims, TokenService};
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::Role;
use crate::error::{ShopError, ShopResult};

/// Gates for routes that need a signed-in user
pub const AUTHENTICATED: &[Gate] = &[Gate::Authenticate, Gate::ResolveUser];

/// Gates for admin-only routes
pub const ADMIN_ONLY: &[Gate] = &[
    Gate::Authenticate,
    Gate::ResolveUser,
    Gate::RequireRole(Role::Admin),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Authenticate,
    ResolveUser,
    RequireRole(Role),
}

/// What is known about the caller so far
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: Option<String>,
    claims: Option<SessionClaims>,
    user: Option<UserProfile>,
}

impl RequestContext {
    /// Context for a request carrying `token` (if any)
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn into_user(self) -> Option<UserProfile> {
        self.user
    }
}

/// The resolved caller, attached to the request for handlers
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

/// Runs gate lists against a user store
pub struct AccessControl<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> AccessControl<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self {
            repo,
            tokens: TokenService::new(config),
        }
    }

    /// Run `gates` in order, stopping at the first failure
    pub async fn run(&self, gates: &[Gate], mut ctx: RequestContext) -> ShopResult<RequestContext> {
        for gate in gates {
            ctx = self.apply(*gate, ctx).await?;
        }
        Ok(ctx)
    }

    /// Run `gates` and return the resolved caller
    pub async fn admit(&self, gates: &[Gate], token: Option<String>) -> ShopResult<CurrentUser> {
        self.run(gates, RequestContext::new(token))
            .await?
            .into_user()
            .map(CurrentUser)
            .ok_or_else(|| ShopError::Internal("Gate list does not resolve a user".to_string()))
    }

    async fn apply(&self, gate: Gate, mut ctx: RequestContext) -> ShopResult<RequestContext> {
        match gate {
            Gate::Authenticate => {
                let token = ctx.token.as_deref().ok_or(ShopError::MissingToken)?;
                ctx.claims = Some(self.tokens.verify(token)?);
            }
            Gate::ResolveUser => {
                let (Some(token), Some(claims)) = (ctx.token.as_deref(), ctx.claims.as_ref())
                else {
                    return Err(ShopError::Internal(
                        "User resolution before authentication".to_string(),
                    ));
                };

                let user = self
                    .repo
                    .find_user(&claims.sub)
                    .await?
                    .ok_or(ShopError::UserNotFound)?;

                if !user.holds_session(token) {
                    return Err(ShopError::SessionRevoked);
                }

                ctx.user = Some(user.profile());
            }
            Gate::RequireRole(role) => {
                let user = ctx.user.as_ref().ok_or_else(|| {
                    ShopError::Internal("Role check before user resolution".to_string())
                })?;

                // Every role grants USER, so only ADMIN can be missing here.
                if !user.roles.permits(role) {
                    return Err(ShopError::AdminRequired);
                }
            }
        }

        Ok(ctx)
    }
}
