//! Product repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{NewProduct, Product, ProductUpdate};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// Resolve many ids in one query. Unknown ids are simply absent from the result.
    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<Product>>;

    /// List products, optionally restricted to one category (exact match)
    async fn list(&self, category: Option<String>) -> AppResult<Vec<Product>>;

    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Insert a batch in a single statement: either every row lands or none does.
    /// Returns the number of rows written.
    async fn create_many(&self, products: Vec<NewProduct>) -> AppResult<u64>;

    /// Apply a partial update; fails with `NotFound` for an unknown id
    async fn update(&self, id: i64, changes: ProductUpdate) -> AppResult<Product>;

    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn new_active_model(product: NewProduct) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(product.name),
        price: Set(product.price),
        image_url: Set(product.image_url),
        description: Set(product.description),
        category: Set(product.category),
        available: Set(product.available),
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = ProductEntity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn list(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        let mut query = ProductEntity::find();
        if let Some(category) = category {
            query = query.filter(product::Column::Category.eq(category));
        }

        let models = query
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let model = new_active_model(product)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn create_many(&self, products: Vec<NewProduct>) -> AppResult<u64> {
        if products.is_empty() {
            return Ok(0);
        }

        ProductEntity::insert_many(products.into_iter().map(new_active_model))
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: i64, changes: ProductUpdate) -> AppResult<Product> {
        let existing = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Product")?;

        if changes.is_empty() {
            return Ok(Product::from(existing));
        }

        let mut active: ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(available) = changes.available {
            active.available = Set(available);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        ProductEntity::find().count(&self.db).await.map_err(Into::into)
    }
}
