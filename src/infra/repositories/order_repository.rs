//! Order repository implementation.
//!
//! An order header and its lines are always written in one transaction, so a
//! reader never sees an order without its items.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    LoaderTrait, ModelTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::entities::order::{self, Entity as OrderEntity};
use super::entities::order_item;
use crate::domain::{NewOrder, Order};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order with all of its lines atomically
    async fn create(&self, order: NewOrder) -> AppResult<Order>;

    /// Find an order together with its lines
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Order>>;

    /// All orders of one user, newest first
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Order>>;

    /// Overwrite the status; fails with `NotFound` for an unknown id
    async fn update_status(&self, id: i64, status: String) -> AppResult<Order>;

    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_order(txn: &DatabaseTransaction, new_order: NewOrder) -> AppResult<Order> {
        let header = order::ActiveModel {
            id: NotSet,
            user_id: Set(new_order.user_id),
            total_amount: Set(new_order.total_amount),
            shipping_address: Set(new_order.shipping_address),
            payment_method: Set(new_order.payment_method),
            notes: Set(new_order.notes),
            status: Set(new_order.status),
            order_date: Set(chrono::Utc::now()),
        }
        .insert(txn)
        .await?;

        let mut items = Vec::with_capacity(new_order.items.len());
        for item in new_order.items {
            let line = order_item::ActiveModel {
                id: NotSet,
                order_id: Set(header.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                price: Set(item.price),
            }
            .insert(txn)
            .await?;
            items.push(line);
        }

        Ok(header.into_domain(items))
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match Self::insert_order(&txn, new_order).await {
            Ok(order) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(order)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        let Some(header) = OrderEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let items = header
            .find_related(order_item::Entity)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(header.into_domain(items)))
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Order>> {
        let headers = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::OrderDate)
            .order_by_desc(order::Column::Id)
            .all(&self.db)
            .await?;

        let items = headers.load_many(order_item::Entity, &self.db).await?;

        Ok(headers
            .into_iter()
            .zip(items)
            .map(|(header, mut items)| {
                items.sort_by_key(|item| item.id);
                header.into_domain(items)
            })
            .collect())
    }

    async fn update_status(&self, id: i64, status: String) -> AppResult<Order> {
        let existing = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Order")?;

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(status);
        let header = active.update(&self.db).await.map_err(AppError::from)?;

        let items = header
            .find_related(order_item::Entity)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(header.into_domain(items))
    }

    async fn count(&self) -> AppResult<u64> {
        OrderEntity::find().count(&self.db).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr, Transaction};

    use crate::domain::NewOrderItem;

    fn header(id: i64, day: u32) -> order::Model {
        order::Model {
            id,
            user_id: 7,
            total_amount: Decimal::new(90, 0),
            shipping_address: "12 Market Street".to_string(),
            payment_method: "CASH_ON_DELIVERY".to_string(),
            notes: None,
            status: "PENDING".to_string(),
            order_date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn line(id: i64, order_id: i64) -> order_item::Model {
        order_item::Model {
            id,
            order_id,
            product_id: 1,
            quantity: 2,
            price: Decimal::new(45, 0),
        }
    }

    fn new_order() -> NewOrder {
        NewOrder {
            user_id: 7,
            items: vec![NewOrderItem {
                product_id: 1,
                quantity: 2,
                price: Decimal::new(45, 0),
            }],
            total_amount: Decimal::new(90, 0),
            shipping_address: "12 Market Street".to_string(),
            payment_method: "CASH_ON_DELIVERY".to_string(),
            notes: None,
            status: "PENDING".to_string(),
        }
    }

    fn sql(transaction: &Transaction) -> Vec<&str> {
        transaction
            .statements()
            .iter()
            .map(|stmt| stmt.sql.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_create_writes_header_and_lines_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header(1, 1)]])
            .append_query_results([vec![line(10, 1)]])
            .into_connection();
        let store = OrderStore::new(db.clone());

        let order = store.create(new_order()).await.unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.order_items[0].id, 10);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = sql(&log[0]);
        assert_eq!(statements.len(), 4);
        assert_eq!(statements[0], "BEGIN");
        assert!(statements[1].starts_with(r#"INSERT INTO "orders""#));
        assert!(statements[2].starts_with(r#"INSERT INTO "order_items""#));
        assert_eq!(statements[3], "COMMIT");
    }

    #[tokio::test]
    async fn test_create_rolls_back_when_a_line_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header(1, 1)]])
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "numeric field overflow".to_string(),
            ))])
            .into_connection();
        let store = OrderStore::new(db.clone());

        let result = store.create(new_order()).await;

        assert!(matches!(result, Err(AppError::Database(_))));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = sql(&log[0]);
        assert_eq!(statements.first(), Some(&"BEGIN"));
        assert_eq!(statements.last(), Some(&"ROLLBACK"));
        assert!(!statements.contains(&"COMMIT"));
    }

    #[tokio::test]
    async fn test_list_by_user_is_newest_first_with_ordered_lines() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header(2, 9), header(1, 1)]])
            .append_query_results([vec![line(12, 2), line(11, 1), line(13, 2), line(10, 1)]])
            .into_connection();
        let store = OrderStore::new(db.clone());

        let orders = store.list_by_user(7).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, 2);
        let line_ids: Vec<Vec<i64>> = orders
            .iter()
            .map(|o| o.order_items.iter().map(|i| i.id).collect())
            .collect();
        assert_eq!(line_ids, vec![vec![12, 13], vec![10, 11]]);

        let log = db.into_transaction_log();
        let headers_query = &log[0].statements()[0].sql;
        assert!(headers_query.contains(r#"WHERE "orders"."user_id" = $1"#));
        assert!(headers_query
            .contains(r#"ORDER BY "orders"."order_date" DESC, "orders"."id" DESC"#));
    }
}
