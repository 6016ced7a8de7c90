//! Shared fixtures for integration tests.
//!
//! Two units of work are provided: [`MockUow`] wraps mockall repositories for
//! service-level tests, and [`MemoryUow`] keeps rows in memory so the real
//! router can be driven end to end without PostgreSQL or Redis.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use grocify::config::Config;
use grocify::domain::{
    Feedback, NewFeedback, NewOrder, NewProduct, Order, OrderItem, Product, ProductUpdate, User,
    UserRole,
};
use grocify::errors::{AppError, AppResult};
use grocify::infra::{
    FeedbackRepository, MockFeedbackRepository, MockOrderRepository, MockProductRepository,
    MockUserRepository, OrderRepository, ProductRepository, UnitOfWork, UserRepository,
};
use grocify::services::{bootstrap, Services};
use grocify::{create_router, AppState};

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub fn test_config() -> Config {
    Config::new("postgres://unused/grocify_test", TEST_JWT_SECRET).unwrap()
}

pub fn test_user(id: i64, username: &str, role: UserRole) -> User {
    User {
        id,
        username: username.to_string(),
        password_hash: "hashed".to_string(),
        role,
        enabled: true,
        created_at: Utc::now(),
    }
}

pub fn test_product(id: i64, price: Decimal) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        price,
        image_url: None,
        description: None,
        category: "Fruits".to_string(),
        available: true,
    }
}

/// What a store would hand back after persisting `new_order`
pub fn persisted_order(id: i64, new_order: NewOrder) -> Order {
    Order {
        id,
        user_id: new_order.user_id,
        order_items: new_order
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| OrderItem {
                id: i as i64 + 1,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total_amount: new_order.total_amount,
        shipping_address: new_order.shipping_address,
        payment_method: new_order.payment_method,
        notes: new_order.notes,
        status: new_order.status,
        order_date: Utc::now(),
    }
}

// =============================================================================
// Mock-backed unit of work
// =============================================================================

/// Repository mocks; unset ones panic on any call.
#[derive(Default)]
pub struct Mocks {
    pub users: MockUserRepository,
    pub products: MockProductRepository,
    pub orders: MockOrderRepository,
    pub feedback: MockFeedbackRepository,
}

impl Mocks {
    pub fn into_uow(self) -> Arc<MockUow> {
        Arc::new(MockUow {
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            feedback: Arc::new(self.feedback),
        })
    }
}

pub struct MockUow {
    users: Arc<MockUserRepository>,
    products: Arc<MockProductRepository>,
    orders: Arc<MockOrderRepository>,
    feedback: Arc<MockFeedbackRepository>,
}

impl UnitOfWork for MockUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback.clone()
    }
}

// =============================================================================
// In-memory unit of work
// =============================================================================

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryUsers(Mutex<Table<User>>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().any(|u| u.username == username))
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        role: UserRole,
    ) -> AppResult<User> {
        let mut table = self.0.lock().unwrap();
        if table.rows.iter().any(|u| u.username == username) {
            return Err(AppError::conflict("Username"));
        }
        let user = User {
            id: table.next_id(),
            username,
            password_hash,
            role,
            enabled: true,
            created_at: Utc::now(),
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.0.lock().unwrap().rows.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.0.lock().unwrap().rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryProducts(Mutex<Table<Product>>);

#[async_trait]
impl ProductRepository for MemoryProducts {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<Product>> {
        let table = self.0.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        let table = self.0.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .filter(|p| category.as_ref().map_or(true, |c| &p.category == c))
            .cloned()
            .collect())
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let mut table = self.0.lock().unwrap();
        let product = Product {
            id: table.next_id(),
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            description: product.description,
            category: product.category,
            available: product.available,
        };
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn create_many(&self, products: Vec<NewProduct>) -> AppResult<u64> {
        let written = products.len() as u64;
        for product in products {
            self.create(product).await?;
        }
        Ok(written)
    }

    async fn update(&self, id: i64, changes: ProductUpdate) -> AppResult<Product> {
        let mut table = self.0.lock().unwrap();
        let product = table
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound("Product"))?;

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(image_url) = changes.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(category) = changes.category {
            product.category = category;
        }
        if let Some(available) = changes.available {
            product.available = available;
        }
        Ok(product.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.0.lock().unwrap().rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryOrders(Mutex<Table<Order>>);

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut table = self.0.lock().unwrap();
        let order = persisted_order(table.next_id(), new_order);
        table.rows.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().find(|o| o.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Order>> {
        let table = self.0.lock().unwrap();
        let mut orders: Vec<Order> = table
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn update_status(&self, id: i64, status: String) -> AppResult<Order> {
        let mut table = self.0.lock().unwrap();
        let order = table
            .rows
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(AppError::NotFound("Order"))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.0.lock().unwrap().rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryFeedback(Mutex<Table<Feedback>>);

impl MemoryFeedback {
    fn newest_first(&self, keep: impl Fn(&Feedback) -> bool) -> Vec<Feedback> {
        let table = self.0.lock().unwrap();
        let mut rows: Vec<Feedback> = table.rows.iter().filter(|f| keep(f)).cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedback {
    async fn create(&self, new_feedback: NewFeedback) -> AppResult<Feedback> {
        let mut table = self.0.lock().unwrap();
        let feedback = Feedback {
            id: table.next_id(),
            user_id: new_feedback.user_id,
            product_id: new_feedback.product_id,
            rating: new_feedback.rating,
            comment: new_feedback.comment,
            feedback_type: new_feedback.feedback_type,
            is_public: new_feedback.is_public,
            created_at: Utc::now(),
        };
        table.rows.push(feedback.clone());
        Ok(feedback)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Feedback>> {
        let table = self.0.lock().unwrap();
        Ok(table.rows.iter().find(|f| f.id == id).cloned())
    }

    async fn list_public_for_product(&self, product_id: i64) -> AppResult<Vec<Feedback>> {
        Ok(self.newest_first(|f| f.is_public && f.product_id == Some(product_id)))
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Feedback>> {
        Ok(self.newest_first(|f| f.user_id == user_id))
    }

    async fn list_public(&self) -> AppResult<Vec<Feedback>> {
        Ok(self.newest_first(|f| f.is_public))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut table = self.0.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|f| f.id != id);
        Ok(table.rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryUow {
    pub users: Arc<MemoryUsers>,
    pub products: Arc<MemoryProducts>,
    pub orders: Arc<MemoryOrders>,
    pub feedback: Arc<MemoryFeedback>,
}

impl UnitOfWork for MemoryUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn feedback(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback.clone()
    }
}

// =============================================================================
// Router harness
// =============================================================================

/// Router over a bootstrapped in-memory store (admin/admin123, user/user123, full catalog)
pub struct TestApp {
    pub router: Router,
    pub uow: Arc<MemoryUow>,
}

impl TestApp {
    pub async fn new() -> Self {
        let uow = Arc::new(MemoryUow::default());
        bootstrap(uow.as_ref()).await.unwrap();

        let services = Services::from_unit_of_work(uow.clone(), test_config());
        let router = create_router(AppState::from_services(&services));

        Self { router, uow }
    }

    /// Send a request and decode the JSON body (Null when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Register a fresh USER account and return its token
    pub async fn signup(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(serde_json::json!({ "username": username, "password": "secret99" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }
}
