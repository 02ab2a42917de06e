//! HTTP Handlers
//!
//! Every handler answers with a [`Envelope`]; failures go through
//! [`ShopError`]'s `IntoResponse`.

use axum::Extension;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, header};
use axum::response::IntoResponse;
use kernel::response::{ApiJson, ApiPath, Envelope};
use std::sync::Arc;

use crate::application::{
    AddAddressUseCase, AdminUseCase, CartUseCase, CatalogUseCase, CurrentUser, LoginOutput,
    LoginUseCase, LogoutUseCase, MailQueue, PlaceOrderUseCase, RegisterUseCase, ShopConfig,
    UserDetailsUseCase,
};
use crate::domain::repository::ShopRepository;
use crate::error::{ShopError, ShopResult};
use crate::presentation::dto::{
    AddAddressRequest, CreateOrderRequest, LoginRequest, LoginResponse, ProductRequest,
    RegisterRequest, parse_id,
};

/// Shared state for shop handlers
#[derive(Clone)]
pub struct ShopAppState<R>
where
    R: ShopRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<ShopConfig>,
    pub mail: MailQueue,
}

/// GET /api/v1/health-check
pub async fn health_check() -> Envelope<()> {
    Envelope::message("OK")
}

// ============================================================================
// Public
// ============================================================================

/// POST /api/v1/public/register
pub async fn register<R>(
    State(state): State<ShopAppState<R>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.config.clone(), state.mail.clone());
    let user = use_case.execute(req.into()).await?;

    Ok(Envelope::ok("User register successfully", "userData", user))
}

/// POST /api/v1/public/login
pub async fn login<R>(
    State(state): State<ShopAppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(req.into()).await?;

    session_response(&state.config, output, "User login successfully")
}

/// POST /api/v1/public/admin-login
pub async fn admin_login<R>(
    State(state): State<ShopAppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute_admin(req.into()).await?;

    session_response(&state.config, output, "Admin login successfully")
}

/// Token goes out twice: as the session cookie and in the body
fn session_response(
    config: &ShopConfig,
    output: LoginOutput,
    message: &'static str,
) -> ShopResult<([(HeaderName, HeaderValue); 1], Envelope<LoginResponse>)> {
    let cookie = config
        .cookie_config()
        .set_cookie_header(&output.token)
        .ok_or_else(|| ShopError::Internal("Session token is not a valid header value".into()))?;

    let body = LoginResponse {
        user: output.user,
        token: output.token,
    };

    Ok(([(header::SET_COOKIE, cookie)], Envelope::merged(message, body)))
}

/// GET /api/v1/public/get-all-products
pub async fn list_products<R>(
    State(state): State<ShopAppState<R>>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let products = CatalogUseCase::new(state.repo.clone()).list().await?;
    Ok(Envelope::ok("Products found", "all_products", products))
}

/// GET /api/v1/product/get-by-id/{id}
pub async fn get_product<R>(
    State(state): State<ShopAppState<R>>,
    ApiPath(id): ApiPath<String>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product_id = parse_id(&id)?;
    let product = CatalogUseCase::new(state.repo.clone()).get(&product_id).await?;
    Ok(Envelope::ok("Product found", "product", product))
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/v1/auth/logout
pub async fn logout<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    LogoutUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .delete_cookie_header()
        .ok_or_else(|| ShopError::Internal("Cookie name is not a valid header value".into()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Envelope::message("User logout successfully"),
    ))
}

// ============================================================================
// User
// ============================================================================

/// GET /api/v1/user/user-details
pub async fn user_details<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let details = UserDetailsUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;
    Ok(Envelope::ok("user details get successfully", "userDetails", details))
}

/// POST /api/v1/user/add-to-cart/{id}
pub async fn add_to_cart<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(id): ApiPath<String>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product_id = parse_id(&id)?;
    let cart = CartUseCase::new(state.repo.clone())
        .add(&user.user_id, &product_id)
        .await?;
    Ok(Envelope::ok("Product added to cart", "cart_items", cart))
}

/// POST /api/v1/user/delete-cart/{id}
pub async fn delete_cart_item<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(id): ApiPath<String>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product_id = parse_id(&id)?;
    let cart = CartUseCase::new(state.repo.clone())
        .remove(&user.user_id, &product_id)
        .await?;
    Ok(Envelope::ok("Product removed from cart", "cart_items", cart))
}

/// POST /api/v1/user/add-address
pub async fn add_address<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(req): ApiJson<AddAddressRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let address = AddAddressUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&user, req.into())
        .await?;
    Ok(Envelope::ok("Address added successfully", "address", address))
}

/// POST /api/v1/user/create-order/{id}
pub async fn create_order<R>(
    State(state): State<ShopAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let input = req.into_input(parse_id(&id)?)?;
    let order = PlaceOrderUseCase::new(state.repo.clone())
        .execute(&user.user_id, input)
        .await?;
    Ok(Envelope::created("Order placed successfully", "order", order))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/v1/admin/get-all-users
pub async fn admin_list_users<R>(
    State(state): State<ShopAppState<R>>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let users = AdminUseCase::new(state.repo.clone()).list_users().await?;
    Ok(Envelope::ok("Users found", "all_users", users))
}

/// POST /api/v1/admin/add-product
pub async fn admin_add_product<R>(
    State(state): State<ShopAppState<R>>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product = CatalogUseCase::new(state.repo.clone()).add(req.into()).await?;
    Ok(Envelope::ok("Product added", "product", product))
}

/// PUT /api/v1/admin/update-product/{id}
pub async fn admin_update_product<R>(
    State(state): State<ShopAppState<R>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product_id = parse_id(&id)?;
    let product = CatalogUseCase::new(state.repo.clone())
        .update(&product_id, req.into())
        .await?;
    Ok(Envelope::ok("Product updated successfully", "updated_product", product))
}

/// DELETE /api/v1/admin/delete/{id}
pub async fn admin_delete_product<R>(
    State(state): State<ShopAppState<R>>,
    ApiPath(id): ApiPath<String>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let product_id = parse_id(&id)?;
    let product = CatalogUseCase::new(state.repo.clone())
        .delete(&product_id)
        .await?;
    Ok(Envelope::ok("Product deleted", "product", product))
}

/// POST /api/v1/admin/delete-user/{id}
pub async fn admin_delete_user<R>(
    State(state): State<ShopAppState<R>>,
    ApiPath(id): ApiPath<String>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let user_id = parse_id(&id)?;
    AdminUseCase::new(state.repo.clone())
        .delete_user(&user_id)
        .await?;
    Ok(Envelope::message("User deleted successfully"))
}

/// GET /api/v1/admin/get-all-order
pub async fn admin_list_orders<R>(
    State(state): State<ShopAppState<R>>,
) -> ShopResult<impl IntoResponse>
where
    R: ShopRepository,
{
    let orders = AdminUseCase::new(state.repo.clone()).list_orders().await?;
    Ok(Envelope::ok("Orders found", "orders", orders))
}
