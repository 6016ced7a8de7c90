//! Admin handlers. Every route requires the ADMIN role.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::errors::{AppResult, ErrorResponse};
use crate::services::{ProductListing, StoreStats, UserListing};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/users", get(users))
        .route("/products", get(products))
}

/// Store-wide counters
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counters", body = StoreStats),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    )
)]
pub async fn stats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<StoreStats>> {
    require_admin(&current_user)?;
    Ok(Json(state.admin_service.stats().await?))
}

/// All accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users", body = UserListing),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    )
)]
pub async fn users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserListing>> {
    require_admin(&current_user)?;
    Ok(Json(state.admin_service.users().await?))
}

/// Whole catalog, including unavailable products
#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products", body = ProductListing),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    )
)]
pub async fn products(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ProductListing>> {
    require_admin(&current_user)?;
    Ok(Json(state.admin_service.products().await?))
}
