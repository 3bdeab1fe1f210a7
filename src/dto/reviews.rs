use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{require_id, require_text},
    error::{AppError, AppResult},
    models::Review,
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

fn check_rating(rating: Option<i32>) -> AppResult<i32> {
    match rating {
        None => Err(AppError::validation("All fields are required")),
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => {
            Err(AppError::validation("Rating must be between 1 and 5"))
        }
        Some(r) => Ok(r),
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub menu_id: Option<i32>,
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub rating: Option<i32>,
    pub comment: Option<String>,
    /// Overrides the name looked up from the users table.
    pub user_name: Option<String>,
    /// Overrides the image looked up from the users table.
    pub user_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub menu_id: i32,
    pub user_email: String,
    pub rating: i32,
    pub comment: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> AppResult<NewReview> {
        const MISSING: &str = "All fields are required";
        let menu_id = require_id(self.menu_id, MISSING, "Invalid Menu ID")?;
        let user_email = require_text(self.user_email.as_deref(), MISSING)?.to_lowercase();
        let comment = require_text(self.comment.as_deref(), MISSING)?;
        let rating = check_rating(self.rating)?;
        Ok(NewReview {
            menu_id,
            user_email,
            rating,
            comment,
            user_name: non_blank(&self.user_name),
            user_image: non_blank(&self.user_image),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::lenient_i32")]
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEdit {
    pub user_email: String,
    pub rating: i32,
    pub comment: String,
}

impl UpdateReviewRequest {
    pub fn validate(&self) -> AppResult<ReviewEdit> {
        const MISSING: &str = "All fields are required";
        let user_email = require_text(self.user_email.as_deref(), MISSING)?.to_lowercase();
        let comment = require_text(self.comment.as_deref(), MISSING)?;
        let rating = check_rating(self.rating)?;
        Ok(ReviewEdit {
            user_email,
            rating,
            comment,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteReviewRequest {
    pub user_email: Option<String>,
}

impl DeleteReviewRequest {
    pub fn validate(&self) -> AppResult<String> {
        Ok(require_text(self.user_email.as_deref(), "User email is required")?.to_lowercase())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewList {
    #[schema(value_type = Vec<Review>)]
    pub items: Vec<Review>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
