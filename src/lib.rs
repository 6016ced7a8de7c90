//! Grocify - grocery e-commerce backend
//!
//! Accounts with USER/ADMIN roles, a product catalog, order placement with
//! price snapshots, and product feedback, served over a JSON HTTP API.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and pure order pricing
//! - **services**: Application use cases
//! - **infra**: Database, migrations, repositories and Redis
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! grocify serve --port 8081
//! grocify migrate up
//! grocify seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Order, Product, User, UserRole};
pub use errors::{AppError, AppResult};
