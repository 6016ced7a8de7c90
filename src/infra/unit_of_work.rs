//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository so services depend on a single
//! injectable handle. Multi-row writes that must be atomic (placing an order)
//! run inside a transaction owned by the repository that performs them.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    FeedbackRepository, FeedbackStore, OrderRepository, OrderStore, ProductRepository,
    ProductStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    fn feedback(&self) -> Arc<dyn FeedbackRepository>;
}

/// Concrete implementation of UnitOfWork backed by one connection pool
pub struct Persistence {
    users: Arc<UserStore>,
    products: Arc<ProductStore>,
    orders: Arc<OrderStore>,
    feedback: Arc<FeedbackStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            products: Arc::new(ProductStore::new(db.clone())),
            orders: Arc::new(OrderStore::new(db.clone())),
            feedback: Arc::new(FeedbackStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
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
