//! Order service - turns carts into persisted orders.
//!
//! Prices are snapshotted from the catalog when the order is placed. Cart
//! lines naming a product that does not exist are skipped; the order is still
//! created and the skipped ids are reported back to the caller.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::max_order_total;
use crate::domain::{CartLine, Checkout, Order, OrderDraft, PlacedOrder};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Price the cart and persist the order with its items in one transaction.
    /// New orders start as `PENDING`.
    async fn create_order(
        &self,
        user_id: i64,
        lines: Vec<CartLine>,
        checkout: Checkout,
    ) -> AppResult<PlacedOrder>;

    /// Orders of one user, newest first
    async fn get_user_orders(&self, user_id: i64) -> AppResult<Vec<Order>>;

    /// Ownership is not checked here.
    async fn get_order_by_id(&self, id: i64) -> AppResult<Option<Order>>;

    /// Store `status` verbatim. Fails with `NotFound` for an unknown order.
    async fn update_order_status(&self, id: i64, status: String) -> AppResult<Order>;

    async fn count_orders(&self) -> AppResult<u64>;
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn create_order(
        &self,
        user_id: i64,
        lines: Vec<CartLine>,
        checkout: Checkout,
    ) -> AppResult<PlacedOrder> {
        let mut ids: Vec<i64> = lines.iter().map(|line| line.product_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let products: HashMap<_, _> = self
            .uow
            .products()
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let draft = OrderDraft::price_cart(&lines, &products);
        if draft.total_amount > max_order_total() {
            return Err(AppError::validation(
                "Order total exceeds the largest amount an order can hold",
            ));
        }

        let (new_order, skipped_product_ids) = draft.into_new_order(user_id, checkout);

        if !skipped_product_ids.is_empty() {
            tracing::warn!(
                user_id,
                skipped = ?skipped_product_ids,
                "Cart lines reference unknown products; skipping them"
            );
        }

        let order = self.uow.orders().create(new_order).await?;
        tracing::info!(
            order_id = order.id,
            user_id,
            items = order.order_items.len(),
            total = %order.total_amount,
            "Order placed"
        );

        Ok(PlacedOrder {
            order,
            skipped_product_ids,
        })
    }

    async fn get_user_orders(&self, user_id: i64) -> AppResult<Vec<Order>> {
        self.uow.orders().list_by_user(user_id).await
    }

    async fn get_order_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        self.uow.orders().find_by_id(id).await
    }

    async fn update_order_status(&self, id: i64, status: String) -> AppResult<Order> {
        let order = self.uow.orders().update_status(id, status).await?;
        tracing::info!(order_id = order.id, status = %order.status, "Order status changed");
        Ok(order)
    }

    async fn count_orders(&self) -> AppResult<u64> {
        self.uow.orders().count().await
    }
}
