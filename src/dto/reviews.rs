use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Review;

/// The author is always the authenticated caller, so there is no `user_id` here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub movie_id: i32,
    pub rating: i32,
    pub review_text: String,
}

/// Only the rating and text are editable. Unknown fields such as `movie_id`
/// or `user_id` are dropped during deserialization.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReviewQuery {
    pub movie_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewList {
    #[schema(value_type = Vec<Review>)]
    pub items: Vec<Review>,
}
