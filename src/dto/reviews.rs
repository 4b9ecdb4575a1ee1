use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Review, UserSummary};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub provider: Uuid,
    pub customer: Uuid,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewSubmitted {
    pub message: String,
    pub review: Review,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub customer: Option<UserSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StarCount {
    pub stars: i32,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderReviews {
    pub reviews: Vec<ReviewView>,
    pub average: f64,
    pub total: i64,
    pub breakdown: Vec<StarCount>,
}
