//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{
    AdminService, AuthService, CatalogService, FeedbackService, OrderService, ServiceContainer,
    Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub order_service: Arc<dyn OrderService>,
    pub feedback_service: Arc<dyn FeedbackService>,
    pub admin_service: Arc<dyn AdminService>,
    /// Redis cache; `None` disables rate limiting
    pub cache: Option<Arc<Cache>>,
    /// Database handle used by the health check
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Option<Arc<Cache>>, config: Config) -> Self {
        let container = Services::from_connection(database.handle(), config);

        Self {
            database: Some(database),
            cache,
            ..Self::from_services(&container)
        }
    }

    /// Build state around an existing service container, without database or cache handles.
    pub fn from_services(services: &dyn ServiceContainer) -> Self {
        Self {
            auth_service: services.auth(),
            catalog_service: services.catalog(),
            order_service: services.orders(),
            feedback_service: services.feedback(),
            admin_service: services.admin(),
            cache: None,
            database: None,
        }
    }
}
