use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ProviderReviews, ReviewSubmitted},
    error::AppResult,
    middleware::json::ValidatedJson,
    response::ErrorBody,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_review))
        .route("/{provider_id}", get(provider_reviews))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored and provider rating recomputed", body = ReviewSubmitted),
        (status = 400, description = "Invalid rating or body", body = ErrorBody),
    ),
    tag = "Reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewSubmitted>)> {
    let resp = review_service::submit_review(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{provider_id}",
    params(
        ("provider_id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Reviews with average, total and star breakdown", body = ProviderReviews),
    ),
    tag = "Reviews"
)]
pub async fn provider_reviews(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<ProviderReviews>> {
    let resp = review_service::provider_reviews(&state, provider_id).await?;
    Ok(Json(resp))
}
