//! Order service tests using mock repositories.

mod common;

use mockall::predicate::*;
use rust_decimal::Decimal;

use common::{persisted_order, test_product, Mocks};
use grocify::domain::{CartLine, Checkout};
use grocify::errors::AppError;
use grocify::services::{OrderManager, OrderService};

fn checkout() -> Checkout {
    Checkout {
        shipping_address: "12 Market Street".to_string(),
        payment_method: "CASH_ON_DELIVERY".to_string(),
        notes: Some("Ring twice".to_string()),
    }
}

#[tokio::test]
async fn test_create_order_prices_lines_from_catalog() {
    let mut mocks = Mocks::default();
    mocks
        .products
        .expect_find_by_ids()
        .with(eq(vec![1, 2]))
        .times(1)
        .returning(|_| {
            Ok(vec![
                test_product(1, Decimal::new(45, 0)),
                test_product(2, Decimal::new(1250, 2)),
            ])
        });
    mocks
        .orders
        .expect_create()
        .withf(|order| {
            order.user_id == 7
                && order.status == "PENDING"
                && order.items.len() == 3
                && order.total_amount == Decimal::new(11250, 2)
        })
        .times(1)
        .returning(|order| Ok(persisted_order(100, order)));

    let service = OrderManager::new(mocks.into_uow());
    let placed = service
        .create_order(
            7,
            vec![CartLine::new(2, 1), CartLine::new(1, 2), CartLine::new(2, 1)],
            checkout(),
        )
        .await
        .unwrap();

    // 12.50 + 45 * 2 + 12.50
    assert_eq!(placed.order.total_amount, Decimal::new(11250, 2));
    assert_eq!(placed.order.items_total(), placed.order.total_amount);
    assert_eq!(placed.order.notes.as_deref(), Some("Ring twice"));
    assert!(placed.skipped_product_ids.is_empty());
}

#[tokio::test]
async fn test_create_order_with_unknown_product_yields_empty_order() {
    let mut mocks = Mocks::default();
    mocks
        .products
        .expect_find_by_ids()
        .with(eq(vec![9999]))
        .returning(|_| Ok(vec![]));
    mocks
        .orders
        .expect_create()
        .withf(|order| order.items.is_empty() && order.total_amount == Decimal::ZERO)
        .times(1)
        .returning(|order| Ok(persisted_order(1, order)));

    let service = OrderManager::new(mocks.into_uow());
    let placed = service
        .create_order(7, vec![CartLine::new(9999, 2)], checkout())
        .await
        .unwrap();

    assert!(placed.order.order_items.is_empty());
    assert_eq!(placed.order.total_amount, Decimal::ZERO);
    assert_eq!(placed.skipped_product_ids, vec![9999]);
}

#[tokio::test]
async fn test_create_order_propagates_store_failure() {
    let mut mocks = Mocks::default();
    mocks
        .products
        .expect_find_by_ids()
        .returning(|_| Ok(vec![test_product(1, Decimal::ONE)]));
    mocks
        .orders
        .expect_create()
        .returning(|_| Err(AppError::internal("insert failed")));

    let service = OrderManager::new(mocks.into_uow());
    let result = service
        .create_order(7, vec![CartLine::new(1, 1)], checkout())
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn test_create_order_rejects_total_beyond_order_column() {
    let mut mocks = Mocks::default();
    mocks
        .products
        .expect_find_by_ids()
        .returning(|_| Ok(vec![test_product(1, grocify::config::max_product_price())]));
    mocks.orders.expect_create().never();

    let service = OrderManager::new(mocks.into_uow());
    let result = service
        .create_order(7, vec![CartLine::new(1, 10_000)], checkout())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_get_user_orders_queries_by_owner() {
    let mut mocks = Mocks::default();
    mocks
        .orders
        .expect_list_by_user()
        .with(eq(7))
        .times(1)
        .returning(|_| Ok(vec![]));

    let service = OrderManager::new(mocks.into_uow());

    assert!(service.get_user_orders(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_order_status_stores_value_verbatim() {
    let mut mocks = Mocks::default();
    mocks
        .orders
        .expect_update_status()
        .with(eq(3), eq("banana".to_string()))
        .times(1)
        .returning(|id, status| {
            let mut order = persisted_order(
                id,
                grocify::domain::NewOrder {
                    user_id: 7,
                    items: vec![],
                    total_amount: Decimal::ZERO,
                    shipping_address: "x".to_string(),
                    payment_method: "card".to_string(),
                    notes: None,
                    status: "PENDING".to_string(),
                },
            );
            order.status = status;
            Ok(order)
        });

    let service = OrderManager::new(mocks.into_uow());
    let order = service
        .update_order_status(3, "banana".to_string())
        .await
        .unwrap();

    assert_eq!(order.status, "banana");
}

#[tokio::test]
async fn test_update_order_status_missing_order() {
    let mut mocks = Mocks::default();
    mocks
        .orders
        .expect_update_status()
        .returning(|_, _| Err(AppError::NotFound("Order")));

    let service = OrderManager::new(mocks.into_uow());
    let result = service
        .update_order_status(404, "SHIPPED".to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound("Order"))));
}
