//! Admin service - store-wide statistics and listings.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{Product, UserResponse};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Store-wide counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_users: u64,
    pub total_products: u64,
    pub total_orders: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserListing {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub total: usize,
}

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn stats(&self) -> AppResult<StoreStats>;

    /// Every account, without password hashes
    async fn users(&self) -> AppResult<UserListing>;

    async fn products(&self) -> AppResult<ProductListing>;
}

pub struct AdminConsole<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminConsole<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminConsole<U> {
    async fn stats(&self) -> AppResult<StoreStats> {
        let (users, products, orders) = (self.uow.users(), self.uow.products(), self.uow.orders());

        let (total_users, total_products, total_orders) =
            tokio::try_join!(users.count(), products.count(), orders.count())?;

        Ok(StoreStats {
            total_users,
            total_products,
            total_orders,
        })
    }

    async fn users(&self) -> AppResult<UserListing> {
        let users: Vec<UserResponse> = self
            .uow
            .users()
            .list()
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        Ok(UserListing {
            total: users.len(),
            users,
        })
    }

    async fn products(&self) -> AppResult<ProductListing> {
        let products = self.uow.products().list(None).await?;

        Ok(ProductListing {
            total: products.len(),
            products,
        })
    }
}
