//! Feedback repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};

use super::entities::feedback::{self, ActiveModel, Entity as FeedbackEntity};
use crate::domain::{Feedback, NewFeedback};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Feedback repository trait for dependency injection.
///
/// Every listing is ordered newest first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: NewFeedback) -> AppResult<Feedback>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Feedback>>;

    /// Public feedback attached to one product
    async fn list_public_for_product(&self, product_id: i64) -> AppResult<Vec<Feedback>>;

    /// Everything one user wrote, public or not
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Feedback>>;

    /// All public feedback
    async fn list_public(&self) -> AppResult<Vec<Feedback>>;

    /// Remove by id; returns false when nothing was deleted
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Concrete implementation of FeedbackRepository
pub struct FeedbackStore {
    db: DatabaseConnection,
}

impl FeedbackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<FeedbackEntity>) -> AppResult<Vec<Feedback>> {
        let models = query
            .order_by_desc(feedback::Column::CreatedAt)
            .order_by_desc(feedback::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Feedback::from).collect())
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn create(&self, new_feedback: NewFeedback) -> AppResult<Feedback> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(new_feedback.user_id),
            product_id: Set(new_feedback.product_id),
            rating: Set(new_feedback.rating),
            comment: Set(new_feedback.comment),
            feedback_type: Set(new_feedback.feedback_type.as_str().to_string()),
            is_public: Set(new_feedback.is_public),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Feedback::from(model))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Feedback>> {
        let result = FeedbackEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Feedback::from))
    }

    async fn list_public_for_product(&self, product_id: i64) -> AppResult<Vec<Feedback>> {
        self.fetch(
            FeedbackEntity::find()
                .filter(feedback::Column::ProductId.eq(product_id))
                .filter(feedback::Column::IsPublic.eq(true)),
        )
        .await
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Feedback>> {
        self.fetch(FeedbackEntity::find().filter(feedback::Column::UserId.eq(user_id)))
            .await
    }

    async fn list_public(&self) -> AppResult<Vec<Feedback>> {
        self.fetch(FeedbackEntity::find().filter(feedback::Column::IsPublic.eq(true)))
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = FeedbackEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
