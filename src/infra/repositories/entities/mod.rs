//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod feedback;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
