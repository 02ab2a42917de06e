//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, Id, ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{address::Address, order::Order, product::Product, user::User};
use crate::domain::repository::{
    AddressRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::domain::value_object::{
    email::Email,
    payment::{PaymentMode, PaymentStatus},
    phone_number::PhoneNumber,
    pin_code::PinCode,
    price::Price,
    product_status::ProductStatus,
    user_password::UserPassword,
    user_role::RoleSet,
};
use crate::error::{ShopError, ShopResult};

/// PostgreSQL-backed shop repository
#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: &UserId) -> ShopResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

fn uuids<T>(ids: &[Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgShopRepository {
    async fn create_user(&self, user: &User) -> ShopResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                email,
                profile_image,
                roles,
                password_hash,
                session_token,
                cart_items,
                addresses,
                order_history,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(&user.profile_image)
        .bind(user.roles.codes())
        .bind(user.password.as_phc_string())
        .bind(user.session_token.as_deref())
        .bind(uuids(&user.cart_items))
        .bind(uuids(&user.addresses))
        .bind(uuids(&user.order_history))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ShopError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, user_id: &UserId) -> ShopResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                first_name,
                last_name,
                email,
                profile_image,
                roles,
                password_hash,
                session_token,
                cart_items,
                addresses,
                order_history,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_user_by_email(&self, email: &Email) -> ShopResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                first_name,
                last_name,
                email,
                profile_image,
                roles,
                password_hash,
                session_token,
                cart_items,
                addresses,
                order_history,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn email_exists(&self, email: &Email) -> ShopResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_users(&self) -> ShopResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                first_name,
                last_name,
                email,
                profile_image,
                roles,
                password_hash,
                session_token,
                cart_items,
                addresses,
                order_history,
                created_at,
                updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn set_session_token(&self, user_id: &UserId, token: Option<&str>) -> ShopResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET session_token = $2, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(ShopError::UserNotFound);
        }
        Ok(())
    }

    async fn add_cart_item(&self, user_id: &UserId, product_id: &ProductId) -> ShopResult<bool> {
        // Check and append in one statement, so concurrent adds cannot both win.
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET cart_items = array_append(cart_items, $2), updated_at = NOW()
            WHERE user_id = $1 AND NOT ($2 = ANY(cart_items))
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 && !self.user_exists(user_id).await? {
            return Err(ShopError::UserNotFound);
        }
        Ok(updated == 1)
    }

    async fn remove_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> ShopResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET cart_items = array_remove(cart_items, $2), updated_at = NOW()
            WHERE user_id = $1 AND $2 = ANY(cart_items)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(product_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 && !self.user_exists(user_id).await? {
            return Err(ShopError::UserNotFound);
        }
        Ok(updated == 1)
    }

    async fn delete_user(&self, user_id: &UserId) -> ShopResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted == 1)
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgShopRepository {
    async fn create_product(&self, product: &Product) -> ShopResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                product_name,
                product_description,
                price,
                image,
                status,
                category,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.product_name)
        .bind(&product.product_description)
        .bind(product.price.amount())
        .bind(&product.image)
        .bind(product.status.code())
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_product(&self, product_id: &ProductId) -> ShopResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                product_name,
                product_description,
                price,
                image,
                status,
                category,
                created_at,
                updated_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_product()).transpose()
    }

    async fn find_products(&self, product_ids: &[ProductId]) -> ShopResult<Vec<Product>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                product_name,
                product_description,
                price,
                image,
                status,
                category,
                created_at,
                updated_at
            FROM products
            WHERE product_id = ANY($1)
            "#,
        )
        .bind(uuids(product_ids))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_product()).collect()
    }

    async fn list_products(&self) -> ShopResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                product_id,
                product_name,
                product_description,
                price,
                image,
                status,
                category,
                created_at,
                updated_at
            FROM products
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_product()).collect()
    }

    async fn update_product(&self, product: &Product) -> ShopResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET
                product_name = $2,
                product_description = $3,
                price = $4,
                image = $5,
                status = $6,
                category = $7,
                updated_at = $8
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.product_name)
        .bind(&product.product_description)
        .bind(product.price.amount())
        .bind(&product.image)
        .bind(product.status.code())
        .bind(&product.category)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn delete_product(&self, product_id: &ProductId) -> ShopResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted == 1)
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl AddressRepository for PgShopRepository {
    async fn create_address(&self, address: &Address) -> ShopResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO addresses (
                address_id,
                user_id,
                name,
                phone_number,
                country,
                pin_code,
                house_no,
                area,
                landmark,
                city,
                state,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(address.address_id.as_uuid())
        .bind(address.user_id.as_uuid())
        .bind(&address.name)
        .bind(address.phone_number.as_str())
        .bind(&address.country)
        .bind(address.pin_code.as_str())
        .bind(&address.house_no)
        .bind(&address.area)
        .bind(&address.landmark)
        .bind(&address.city)
        .bind(&address.state)
        .bind(address.created_at)
        .bind(address.updated_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET addresses = array_append(addresses, $2), updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(address.user_id.as_uuid())
        .bind(address.address_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            // Dropping `tx` rolls the insert back.
            return Err(ShopError::UserNotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_address(&self, address_id: &AddressId) -> ShopResult<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT
                address_id,
                user_id,
                name,
                phone_number,
                country,
                pin_code,
                house_no,
                area,
                landmark,
                city,
                state,
                created_at,
                updated_at
            FROM addresses
            WHERE address_id = $1
            "#,
        )
        .bind(address_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }

    async fn find_addresses(&self, address_ids: &[AddressId]) -> ShopResult<Vec<Address>> {
        if address_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT
                address_id,
                user_id,
                name,
                phone_number,
                country,
                pin_code,
                house_no,
                area,
                landmark,
                city,
                state,
                created_at,
                updated_at
            FROM addresses
            WHERE address_id = ANY($1)
            "#,
        )
        .bind(uuids(address_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AddressRow::into_address).collect())
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgShopRepository {
    async fn place_order(&self, order: &Order) -> ShopResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id,
                user_id,
                address_id,
                product_id,
                payment_mode,
                payment_status,
                payment_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.address_id.as_uuid())
        .bind(order.product_id.as_uuid())
        .bind(order.payment_mode.code())
        .bind(order.payment_status.code())
        .bind(order.payment_id.as_deref())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET order_history = array_append(order_history, $2), updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(order.user_id.as_uuid())
        .bind(order.product_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(ShopError::UserNotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_orders(&self) -> ShopResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                order_id,
                user_id,
                address_id,
                product_id,
                payment_mode,
                payment_status,
                payment_id,
                created_at,
                updated_at
            FROM orders
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_order()).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    profile_image: String,
    roles: Vec<String>,
    password_hash: String,
    session_token: Option<String>,
    cart_items: Vec<Uuid>,
    addresses: Vec<Uuid>,
    order_history: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> ShopResult<User> {
        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| ShopError::Internal(format!("User {}: {}", self.user_id, e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: Email::from_db(self.email),
            profile_image: self.profile_image,
            roles: RoleSet::from_codes(&self.roles),
            password,
            session_token: self.session_token.filter(|token| !token.is_empty()),
            cart_items: self.cart_items.into_iter().map(Id::from_uuid).collect(),
            addresses: self.addresses.into_iter().map(Id::from_uuid).collect(),
            order_history: self.order_history.into_iter().map(Id::from_uuid).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    product_name: String,
    product_description: String,
    price: Decimal,
    image: String,
    status: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> ShopResult<Product> {
        let status = ProductStatus::from_code(&self.status).ok_or_else(|| {
            ShopError::Internal(format!("Invalid product status: {}", self.status))
        })?;

        Ok(Product {
            product_id: ProductId::from_uuid(self.product_id),
            product_name: self.product_name,
            product_description: self.product_description,
            price: Price::from_db(self.price),
            image: self.image,
            status,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    address_id: Uuid,
    user_id: Uuid,
    name: String,
    phone_number: String,
    country: String,
    pin_code: String,
    house_no: String,
    area: String,
    landmark: String,
    city: String,
    state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            address_id: AddressId::from_uuid(self.address_id),
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            phone_number: PhoneNumber::from_db(self.phone_number),
            country: self.country,
            pin_code: PinCode::from_db(self.pin_code),
            house_no: self.house_no,
            area: self.area,
            landmark: self.landmark,
            city: self.city,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    user_id: Uuid,
    address_id: Uuid,
    product_id: Uuid,
    payment_mode: String,
    payment_status: String,
    payment_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> ShopResult<Order> {
        let payment_mode = PaymentMode::parse(&self.payment_mode)
            .map_err(|_| ShopError::Internal(format!("Invalid payment mode: {}", self.payment_mode)))?;
        let payment_status = PaymentStatus::parse(&self.payment_status).map_err(|_| {
            ShopError::Internal(format!("Invalid payment status: {}", self.payment_status))
        })?;

        Ok(Order {
            order_id: Id::from_uuid(self.order_id),
            user_id: Id::from_uuid(self.user_id),
            address_id: Id::from_uuid(self.address_id),
            product_id: Id::from_uuid(self.product_id),
            payment_mode,
            payment_status,
            payment_id: self.payment_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
