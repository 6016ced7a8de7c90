//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod feedback_handler;
pub mod order_handler;
pub mod product_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{admin_signup_routes, auth_routes};
pub use feedback_handler::feedback_routes;
pub use order_handler::order_routes;
pub use product_handler::{product_admin_routes, product_routes};

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::domain::check_price;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Rejects prices the catalog column cannot store.
pub(crate) fn storable_price(value: &Decimal) -> Result<(), ValidationError> {
    check_price(*value).map_err(|message| {
        let mut err = ValidationError::new("price");
        err.message = Some(message.into());
        err
    })
}
