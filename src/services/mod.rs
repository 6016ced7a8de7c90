//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. Each one is a trait
//! with a concrete implementation generic over the [`UnitOfWork`](crate::infra::UnitOfWork).

mod admin_service;
mod auth_service;
pub mod bootstrap;
mod catalog_service;
pub mod container;
mod feedback_service;
mod order_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminConsole, AdminService, ProductListing, StoreStats, UserListing};
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims};
pub use bootstrap::{bootstrap, BootstrapReport};
pub use catalog_service::{Catalog, CatalogService};
pub use feedback_service::{FeedbackManager, FeedbackService};
pub use order_service::{OrderManager, OrderService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
