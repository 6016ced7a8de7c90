//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories (PostgreSQL via SeaORM)
//! - Optional Redis counters for rate limiting
//! - Unit of Work giving services one handle on every repository

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimitStatus};
pub use db::{Database, MigrationState, Migrator};
pub use repositories::{
    FeedbackRepository, FeedbackStore, OrderRepository, OrderStore, ProductRepository,
    ProductStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockFeedbackRepository, MockOrderRepository, MockProductRepository, MockUserRepository,
};
