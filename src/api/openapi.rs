//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, feedback_handler, order_handler, product_handler,
};
use crate::domain::{Feedback, FeedbackType, Order, OrderItem, Product, UserResponse, UserRole};
use crate::errors::{ErrorBody, ErrorResponse};
use crate::services::{AuthResponse, ProductListing, StoreStats, UserListing};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grocify API",
        version = "0.1.0",
        description = "Grocery store backend: accounts, catalog, orders and feedback",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8081", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::signup,
        auth_handler::signup_admin,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        order_handler::place_order,
        order_handler::my_orders,
        order_handler::get_order,
        order_handler::update_status,
        feedback_handler::submit_feedback,
        feedback_handler::product_feedback,
        feedback_handler::my_feedback,
        feedback_handler::public_feedback,
        feedback_handler::get_feedback,
        feedback_handler::delete_feedback,
        admin_handler::stats,
        admin_handler::users,
        admin_handler::products,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            Product,
            Order,
            OrderItem,
            Feedback,
            FeedbackType,
            ErrorResponse,
            ErrorBody,
            AuthResponse,
            StoreStats,
            UserListing,
            ProductListing,
            auth_handler::LoginRequest,
            auth_handler::SignupRequest,
            auth_handler::AdminSignupRequest,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            order_handler::CartItemRequest,
            order_handler::PlaceOrderRequest,
            order_handler::UpdateStatusRequest,
            order_handler::PlacedOrderResponse,
            feedback_handler::SubmitFeedbackRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and signup"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Order placement and tracking"),
        (name = "Feedback", description = "Reviews, suggestions and complaints"),
        (name = "Admin", description = "Store administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
