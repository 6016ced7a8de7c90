//! Catalog product entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{max_product_price, MONEY_SCALE};

/// A product in the grocery catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Organic Bananas (1kg)")]
    pub name: String,
    /// Unit price
    #[schema(value_type = f64, example = 45.0)]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[schema(example = "Fruits")]
    pub category: String,
    pub available: bool,
}

/// Check that a unit price fits the catalog column: positive, whole cents,
/// and no larger than [`max_product_price`].
pub fn check_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be greater than zero");
    }
    if price.normalize().scale() > MONEY_SCALE {
        return Err("Price must have at most 2 decimal places");
    }
    if price > max_product_price() {
        return Err("Price must not exceed 99999999.99");
    }
    Ok(())
}

/// Data needed to add a product to the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Partial product update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
