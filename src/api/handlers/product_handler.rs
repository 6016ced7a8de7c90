//! Product catalog handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{not_blank, storable_price};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewProduct, Product, ProductUpdate};
use crate::errors::{AppResult, ErrorResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Exact category name, e.g. `Fruits`
    pub category: Option<String>,
}

/// New catalog entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Organic Bananas (1kg)")]
    pub name: String,
    #[validate(custom(function = "storable_price"))]
    #[schema(value_type = f64, example = 45.0)]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    #[schema(example = "Fruits")]
    pub category: String,
    /// Defaults to true
    pub available: Option<bool>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name.trim().to_string(),
            price: req.price,
            image_url: req.image_url,
            description: req.description,
            category: req.category.trim().to_string(),
            available: req.available.unwrap_or(true),
        }
    }
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "storable_price"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "not_blank", message = "Category must not be blank"))]
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(req: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: req.name.map(|n| n.trim().to_string()),
            price: req.price,
            image_url: req.image_url,
            description: req.description,
            category: req.category.map(|c| c.trim().to_string()),
            available: req.available,
        }
    }
}

/// Public catalog routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

/// Catalog management routes (behind authentication)
pub fn product_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product))
}

/// List products, optionally by category
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products ordered by id", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let category = query.category.filter(|c| !c.trim().is_empty());
    let products = state.catalog_service.list_products(category).await?;
    Ok(Json(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.catalog_service.get_product(id).await?))
}

/// Add a product (admin only)
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    require_admin(&current_user)?;

    let product = state.catalog_service.create_product(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    require_admin(&current_user)?;

    let product = state.catalog_service.update_product(id, payload.into()).await?;
    Ok(Json(product))
}
