//! Shop Router
//!
//! Everything is mounted under `/api/v1`:
//!
//! - `/public`: register, login, catalog listing (no session)
//! - `/product`: product lookup (no session)
//! - `/auth`, `/user`: signed-in user
//! - `/admin`: signed-in user with the ADMIN role

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::{MailQueue, ShopConfig};
use crate::domain::repository::ShopRepository;
use crate::infra::postgres::PgShopRepository;
use crate::presentation::handlers::{self, ShopAppState};
use crate::presentation::middleware::{AccessState, require_admin, require_user};

/// Create the shop router with PostgreSQL repository
pub fn shop_router(repo: PgShopRepository, config: ShopConfig, mail: MailQueue) -> Router {
    shop_router_generic(repo, config, mail)
}

/// Create a shop router for any repository implementation
pub fn shop_router_generic<R>(repo: R, config: ShopConfig, mail: MailQueue) -> Router
where
    R: ShopRepository,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let access = AccessState {
        repo: repo.clone(),
        config: config.clone(),
    };
    let state = ShopAppState { repo, config, mail };

    let public = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/admin-login", post(handlers::admin_login::<R>))
        .route("/get-all-products", get(handlers::list_products::<R>));

    let product = Router::new().route("/get-by-id/{id}", get(handlers::get_product::<R>));

    let auth = Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .route_layer(middleware::from_fn_with_state(
            access.clone(),
            require_user::<R>,
        ));

    let user = Router::new()
        .route("/user-details", get(handlers::user_details::<R>))
        .route("/add-to-cart/{id}", post(handlers::add_to_cart::<R>))
        .route("/delete-cart/{id}", post(handlers::delete_cart_item::<R>))
        .route("/add-address", post(handlers::add_address::<R>))
        .route("/create-order/{id}", post(handlers::create_order::<R>))
        .route_layer(middleware::from_fn_with_state(
            access.clone(),
            require_user::<R>,
        ));

    let admin = Router::new()
        .route("/get-all-users", get(handlers::admin_list_users::<R>))
        .route("/get-all-products", get(handlers::list_products::<R>))
        .route("/add-product", post(handlers::admin_add_product::<R>))
        .route("/update-product/{id}", put(handlers::admin_update_product::<R>))
        .route("/delete/{id}", delete(handlers::admin_delete_product::<R>))
        .route("/delete-user/{id}", post(handlers::admin_delete_user::<R>))
        .route("/get-all-order", get(handlers::admin_list_orders::<R>))
        .route_layer(middleware::from_fn_with_state(access, require_admin::<R>));

    let api = Router::new()
        .route("/health-check", get(handlers::health_check))
        .nest("/public", public)
        .nest("/product", product)
        .nest("/auth", auth)
        .nest("/user", user)
        .nest("/admin", admin)
        .with_state(state);

    Router::new().nest("/api/v1", api)
}
