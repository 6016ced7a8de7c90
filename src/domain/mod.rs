//! Domain layer - Core business entities and logic
//!
//! Entities and value objects independent of persistence and HTTP.

pub mod feedback;
pub mod order;
pub mod password;
pub mod product;
pub mod user;

pub use feedback::{Feedback, FeedbackType, NewFeedback};
pub use order::{
    CartLine, Checkout, NewOrder, NewOrderItem, Order, OrderDraft, OrderItem, PlacedOrder,
};
pub use password::Password;
pub use product::{check_price, NewProduct, Product, ProductUpdate};
pub use user::{User, UserResponse, UserRole};
