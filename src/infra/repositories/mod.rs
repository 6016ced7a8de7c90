//! Repository layer - Data access abstraction
//!
//! Each aggregate gets a trait (mockable in tests) and a SeaORM-backed store.

pub(crate) mod entities;
mod feedback_repository;
mod order_repository;
mod product_repository;
mod user_repository;

pub use feedback_repository::{FeedbackRepository, FeedbackStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use feedback_repository::MockFeedbackRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
