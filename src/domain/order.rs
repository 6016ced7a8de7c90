//! Orders, order lines and cart pricing.
//!
//! Pricing is pure: [`OrderDraft::price_cart`] turns cart lines into
//! order-item snapshots using whatever products the caller resolved. Lines
//! whose product could not be resolved are skipped and reported back, and
//! every snapshot carries the unit price the product had when the cart was
//! priced, so later catalog changes never touch an existing order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::Product;
use crate::config::ORDER_STATUS_PENDING;

/// One requested (product, quantity) pair. Product ids may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i32,
}

impl CartLine {
    pub fn new(product_id: i64, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A persisted order line
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Unit price captured when the order was placed
    #[schema(value_type = f64, example = 45.0)]
    pub price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A persisted order with its lines
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub order_items: Vec<OrderItem>,
    #[schema(value_type = f64, example = 90.0)]
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
    #[schema(example = "PENDING")]
    pub status: String,
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Sum of the line subtotals; equals `total_amount` for every order
    /// created through the order workflow.
    pub fn items_total(&self) -> Decimal {
        self.order_items.iter().map(OrderItem::subtotal).sum()
    }
}

/// Order line ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

/// Order ready to be written together with its lines
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub items: Vec<NewOrderItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub status: String,
}

/// Where an order is shipped and how it is paid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub shipping_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Result of pricing a cart against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub items: Vec<NewOrderItem>,
    pub total_amount: Decimal,
    /// Product ids from the cart that did not resolve, in cart order
    pub skipped_product_ids: Vec<i64>,
}

impl OrderDraft {
    /// Price every cart line against `products` (keyed by product id).
    pub fn price_cart(lines: &[CartLine], products: &HashMap<i64, Product>) -> Self {
        let mut items = Vec::with_capacity(lines.len());
        let mut total_amount = Decimal::ZERO;
        let mut skipped_product_ids = Vec::new();

        for line in lines {
            let Some(product) = products.get(&line.product_id) else {
                skipped_product_ids.push(line.product_id);
                continue;
            };

            total_amount += product.price * Decimal::from(line.quantity);
            items.push(NewOrderItem {
                product_id: product.id,
                quantity: line.quantity,
                price: product.price,
            });
        }

        Self {
            items,
            total_amount,
            skipped_product_ids,
        }
    }

    /// Attach owner and checkout details; new orders always start as `PENDING`.
    pub fn into_new_order(self, user_id: i64, checkout: Checkout) -> (NewOrder, Vec<i64>) {
        let order = NewOrder {
            user_id,
            items: self.items,
            total_amount: self.total_amount,
            shipping_address: checkout.shipping_address,
            payment_method: checkout.payment_method,
            notes: checkout.notes,
            status: ORDER_STATUS_PENDING.to_string(),
        };
        (order, self.skipped_product_ids)
    }
}

/// An order that was just placed, plus the cart lines that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub skipped_product_ids: Vec<i64>,
}
