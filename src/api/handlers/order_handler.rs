//! Order handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{canonical_order_status, MAX_ORDER_QUANTITY, ORDER_STATUSES};
use crate::domain::{CartLine, Checkout, Order, PlacedOrder};
use crate::errors::{AppError, AppResult, ErrorResponse, OptionExt};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    #[schema(example = 1)]
    pub product_id: i64,
    #[validate(range(
        min = 1,
        max = MAX_ORDER_QUANTITY,
        message = "Quantity must be between 1 and 10000"
    ))]
    #[schema(example = 2, minimum = 1, maximum = 10000)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "Cart must contain at least one item"), nested)]
    pub cart_items: Vec<CartItemRequest>,
    #[validate(custom(function = "not_blank", message = "Shipping address is required"))]
    #[schema(example = "12 Market Street, Springfield")]
    pub shipping_address: String,
    #[schema(example = "CASH_ON_DELIVERY")]
    pub payment_method: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "SHIPPED")]
    pub status: String,
}

/// A newly placed order
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderResponse {
    #[serde(flatten)]
    pub order: Order,
    /// Cart product ids that did not match any product and were left out
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_product_ids: Vec<i64>,
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order: placed.order,
            skipped_product_ids: placed.skipped_product_ids,
        }
    }
}

/// Create order routes (all require authentication)
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/place", post(place_order))
        .route("/my-orders", get(my_orders))
        .route("/:id", get(get_order))
        .route("/:id/status", put(update_status))
}

/// Place an order for the current user
#[utoipa::path(
    post,
    path = "/api/orders/place",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlacedOrderResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn place_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<PlacedOrderResponse>)> {
    let lines = payload
        .cart_items
        .iter()
        .map(|item| CartLine::new(item.product_id, item.quantity))
        .collect();

    let checkout = Checkout {
        shipping_address: payload.shipping_address.trim().to_string(),
        payment_method: payload.payment_method,
        notes: payload.notes,
    };

    let placed = state
        .order_service
        .create_order(current_user.id, lines, checkout)
        .await?;

    Ok((StatusCode::CREATED, Json(placed.into())))
}

/// Orders of the current user, newest first
#[utoipa::path(
    get,
    path = "/api/orders/my-orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's orders", body = Vec<Order>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn my_orders(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.order_service.get_user_orders(current_user.id).await?))
}

/// Get one of the caller's orders
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "No such order for this user", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    // Other users' orders are reported as missing
    let order = state
        .order_service
        .get_order_by_id(id)
        .await?
        .filter(|order| order.is_owned_by(current_user.id))
        .ok_or_not_found("Order")?;

    Ok(Json(order))
}

/// Change an order's status (owner or admin)
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 403, description = "Not the owner and not an admin", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn update_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service
        .get_order_by_id(id)
        .await?
        .ok_or_not_found("Order")?;

    if !order.is_owned_by(current_user.id) {
        require_admin(&current_user)?;
    }

    let status = canonical_order_status(&payload.status).ok_or_else(|| {
        AppError::validation(format!(
            "Unknown order status '{}'; expected one of {}",
            payload.status.trim(),
            ORDER_STATUSES.join(", ")
        ))
    })?;

    let order = state
        .order_service
        .update_order_status(id, status.to_string())
        .await?;

    Ok(Json(order))
}
