//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppResult, ErrorResponse};
use crate::services::AuthResponse;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "user")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "user123")]
    pub password: String,
}

/// Self-service signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1 to 50 characters"),
        custom(function = "not_blank", message = "Username must not be blank")
    )]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret99", min_length = 6)]
    pub password: String,
    /// Requested role; only USER is granted through this endpoint
    #[schema(example = "USER")]
    pub role: Option<String>,
}

/// Administrator creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminSignupRequest {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1 to 50 characters"),
        custom(function = "not_blank", message = "Username must not be blank")
    )]
    #[schema(example = "ops-admin")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(min_length = 6)]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
}

/// Authentication routes that need an authenticated caller
pub fn admin_signup_routes() -> Router<AppState> {
    Router::new().route("/signup/admin", post(signup_admin))
}

/// Login and get a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid username or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(response))
}

/// Register a new user and get a token
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "ADMIN role requested", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state
        .auth_service
        .signup(payload.username.trim().to_string(), payload.password, payload.role)
        .await?;

    Ok(Json(response))
}

/// Create an administrator (admin only)
#[utoipa::path(
    post,
    path = "/api/auth/signup/admin",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = AdminSignupRequest,
    responses(
        (status = 201, description = "Administrator created", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup_admin(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AdminSignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&current_user)?;

    let user = state
        .auth_service
        .register_admin(payload.username.trim().to_string(), payload.password)
        .await?;

    tracing::info!(created_by = %current_user.username, admin = %user.username, "Administrator created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
