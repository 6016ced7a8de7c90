//! Feedback handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Feedback, FeedbackType, NewFeedback};
use crate::errors::{AppResult, ErrorResponse, OptionExt};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    /// Reviewed product; omit for general feedback
    pub product_id: Option<i64>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
    /// Defaults to REVIEW
    pub feedback_type: Option<FeedbackType>,
    /// Defaults to true
    pub is_public: Option<bool>,
}

/// Create feedback routes (all require authentication)
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_feedback))
        .route("/all", get(public_feedback))
        .route("/my-feedback", get(my_feedback))
        .route("/product/:id", get(product_feedback))
        .route("/:id", get(get_feedback).delete(delete_feedback))
}

/// Leave feedback
#[utoipa::path(
    post,
    path = "/api/feedback/submit",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn submit_feedback(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubmitFeedbackRequest>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let feedback = state
        .feedback_service
        .submit(NewFeedback {
            user_id: current_user.id,
            product_id: payload.product_id,
            rating: payload.rating,
            comment: payload.comment,
            feedback_type: payload.feedback_type.unwrap_or_default(),
            is_public: payload.is_public.unwrap_or(true),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Public feedback for a product, newest first
#[utoipa::path(
    get,
    path = "/api/feedback/product/{id}",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses((status = 200, description = "Public feedback", body = Vec<Feedback>))
)]
pub async fn product_feedback(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Vec<Feedback>>> {
    Ok(Json(state.feedback_service.product_feedback(product_id).await?))
}

/// Everything the caller wrote, newest first
#[utoipa::path(
    get,
    path = "/api/feedback/my-feedback",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The caller's feedback", body = Vec<Feedback>))
)]
pub async fn my_feedback(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Feedback>>> {
    Ok(Json(state.feedback_service.user_feedback(current_user.id).await?))
}

/// All public feedback, newest first
#[utoipa::path(
    get,
    path = "/api/feedback/all",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Public feedback", body = Vec<Feedback>))
)]
pub async fn public_feedback(State(state): State<AppState>) -> AppResult<Json<Vec<Feedback>>> {
    Ok(Json(state.feedback_service.public_feedback().await?))
}

/// Get one feedback entry; private entries are visible to their author only
#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Feedback ID")),
    responses(
        (status = 200, description = "Feedback", body = Feedback),
        (status = 404, description = "Feedback not found", body = ErrorResponse)
    )
)]
pub async fn get_feedback(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Feedback>> {
    let feedback = state
        .feedback_service
        .get_feedback(id)
        .await?
        .filter(|f| f.is_public || f.is_authored_by(current_user.id))
        .ok_or_not_found("Feedback")?;

    Ok(Json(feedback))
}

/// Delete the caller's own feedback
#[utoipa::path(
    delete,
    path = "/api/feedback/{id}",
    tag = "Feedback",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Feedback ID")),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Feedback not found", body = ErrorResponse)
    )
)]
pub async fn delete_feedback(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state
        .feedback_service
        .delete_feedback(current_user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
