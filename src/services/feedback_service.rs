//! Feedback service - reviews, suggestions and complaints.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{MAX_RATING, MIN_RATING};
use crate::domain::{Feedback, NewFeedback};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Record feedback. A referenced product must exist.
    async fn submit(&self, feedback: NewFeedback) -> AppResult<Feedback>;

    /// Public feedback for one product, newest first
    async fn product_feedback(&self, product_id: i64) -> AppResult<Vec<Feedback>>;

    /// Everything a user wrote, newest first
    async fn user_feedback(&self, user_id: i64) -> AppResult<Vec<Feedback>>;

    /// All public feedback, newest first
    async fn public_feedback(&self) -> AppResult<Vec<Feedback>>;

    async fn get_feedback(&self, id: i64) -> AppResult<Option<Feedback>>;

    /// Only the author may delete their feedback.
    async fn delete_feedback(&self, requester_id: i64, id: i64) -> AppResult<()>;
}

pub struct FeedbackManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FeedbackManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FeedbackService for FeedbackManager<U> {
    async fn submit(&self, feedback: NewFeedback) -> AppResult<Feedback> {
        if !(MIN_RATING..=MAX_RATING).contains(&feedback.rating) {
            return Err(AppError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        if let Some(product_id) = feedback.product_id {
            self.uow
                .products()
                .find_by_id(product_id)
                .await?
                .ok_or_not_found("Product")?;
        }

        let feedback = self.uow.feedback().create(feedback).await?;
        tracing::info!(
            feedback_id = feedback.id,
            user_id = feedback.user_id,
            product_id = ?feedback.product_id,
            "Feedback submitted"
        );
        Ok(feedback)
    }

    async fn product_feedback(&self, product_id: i64) -> AppResult<Vec<Feedback>> {
        self.uow.feedback().list_public_for_product(product_id).await
    }

    async fn user_feedback(&self, user_id: i64) -> AppResult<Vec<Feedback>> {
        self.uow.feedback().list_by_user(user_id).await
    }

    async fn public_feedback(&self) -> AppResult<Vec<Feedback>> {
        self.uow.feedback().list_public().await
    }

    async fn get_feedback(&self, id: i64) -> AppResult<Option<Feedback>> {
        self.uow.feedback().find_by_id(id).await
    }

    async fn delete_feedback(&self, requester_id: i64, id: i64) -> AppResult<()> {
        let feedback = self
            .uow
            .feedback()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Feedback")?;

        if !feedback.is_authored_by(requester_id) {
            tracing::warn!(feedback_id = id, requester_id, "Refused to delete another user's feedback");
            return Err(AppError::forbidden("You can only delete your own feedback"));
        }

        if !self.uow.feedback().delete(id).await? {
            return Err(AppError::NotFound("Feedback"));
        }

        tracing::info!(feedback_id = id, "Feedback deleted");
        Ok(())
    }
}
