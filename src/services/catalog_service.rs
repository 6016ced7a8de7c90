//! Catalog service - product browsing and administration.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{check_price, NewProduct, Product, ProductUpdate};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All products, or those of one category, ordered by id
    async fn list_products(&self, category: Option<String>) -> AppResult<Vec<Product>>;

    async fn get_product(&self, id: i64) -> AppResult<Product>;

    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;

    /// Changing the price never touches items of orders already placed.
    async fn update_product(&self, id: i64, changes: ProductUpdate) -> AppResult<Product>;

    async fn count_products(&self) -> AppResult<u64>;
}

pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn ensure_storable_price(price: Decimal) -> AppResult<()> {
    check_price(price).map_err(AppError::validation)
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn list_products(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        self.uow.products().list(category).await
    }

    async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        ensure_storable_price(product.price)?;

        let product = self.uow.products().create(product).await?;
        tracing::info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: i64, changes: ProductUpdate) -> AppResult<Product> {
        if let Some(price) = changes.price {
            ensure_storable_price(price)?;
        }

        let product = self.uow.products().update(id, changes).await?;
        tracing::info!(product_id = product.id, "Product updated");
        Ok(product)
    }

    async fn count_products(&self) -> AppResult<u64> {
        self.uow.products().count().await
    }
}
