//! Product feedback and reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of feedback left by a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackType {
    #[default]
    Review,
    Suggestion,
    Complaint,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Review => "REVIEW",
            FeedbackType::Suggestion => "SUGGESTION",
            FeedbackType::Complaint => "COMPLAINT",
        }
    }
}

impl From<&str> for FeedbackType {
    fn from(s: &str) -> Self {
        match s {
            "SUGGESTION" => FeedbackType::Suggestion,
            "COMPLAINT" => FeedbackType::Complaint,
            _ => FeedbackType::Review,
        }
    }
}

/// Persisted feedback
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    /// Author
    pub user_id: i64,
    /// Reviewed product, absent for general feedback
    pub product_id: Option<i64>,
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
    pub feedback_type: FeedbackType,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Feedback ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub user_id: i64,
    pub product_id: Option<i64>,
    pub rating: i32,
    pub comment: Option<String>,
    pub feedback_type: FeedbackType,
    pub is_public: bool,
}
