//! Access Middleware
//!
//! Runs the gate lists in front of protected routes and attaches the
//! resolved [`CurrentUser`] to the request for the handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::{ADMIN_ONLY, AUTHENTICATED, AccessControl, Gate, ShopConfig};
use crate::domain::repository::UserRepository;

/// Middleware state
#[derive(Clone)]
pub struct AccessState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ShopConfig>,
}

/// Require a signed-in user
pub async fn require_user<R>(
    State(state): State<AccessState<R>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    admit(&state, AUTHENTICATED, req, next).await
}

/// Require a signed-in user holding the ADMIN role
pub async fn require_admin<R>(
    State(state): State<AccessState<R>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    admit(&state, ADMIN_ONLY, req, next).await
}

async fn admit<R>(
    state: &AccessState<R>,
    gates: &[Gate],
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_session_token(req.headers(), &state.config.session_cookie_name);

    let access = AccessControl::new(state.repo.clone(), state.config.clone());
    let user = access
        .admit(gates, token)
        .await
        .map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
