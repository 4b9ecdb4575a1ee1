use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::{CreateReviewRequest, ProviderReviews, ReviewSubmitted, ReviewView, StarCount},
    entity::{
        providers::{Column as ProviderCol, Entity as Providers},
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews},
    },
    error::AppResult,
    services::directory::{review_from_entity, user_summaries},
    state::AppState,
};

/// Store a review, then recompute the provider's average from every review
/// it has.
///
/// The insert and the provider update are separate writes with no lock, so
/// two concurrent submissions can leave the rating missing one of them until
/// the next review arrives.
pub async fn submit_review(
    state: &AppState,
    payload: CreateReviewRequest,
) -> AppResult<ReviewSubmitted> {
    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        provider_id: Set(payload.provider),
        customer_id: Set(payload.customer),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    let ratings: Vec<i32> = Reviews::find()
        .filter(ReviewCol::ProviderId.eq(review.provider_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|r| r.rating)
        .collect();

    if let Some(avg) = mean(&ratings) {
        let updated = Providers::update_many()
            .col_expr(ProviderCol::Rating, Expr::value(avg))
            .filter(ProviderCol::Id.eq(review.provider_id))
            .exec(&state.orm)
            .await?;
        if updated.rows_affected == 0 {
            tracing::debug!(provider_id = %review.provider_id, "review for unknown provider");
        }
    }

    audit::record(
        &state.orm,
        Some(review.customer_id),
        "review_submitted",
        "reviews",
        serde_json::json!({ "review_id": review.id, "provider_id": review.provider_id, "rating": review.rating }),
    )
    .await;

    Ok(ReviewSubmitted {
        message: "Review submitted".into(),
        review: review_from_entity(review),
    })
}

pub async fn provider_reviews(state: &AppState, provider_id: Uuid) -> AppResult<ProviderReviews> {
    let reviews: Vec<_> = Reviews::find()
        .filter(ReviewCol::ProviderId.eq(provider_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();

    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
    let customers = user_summaries(&state.orm, reviews.iter().map(|r| r.customer_id)).await?;

    let reviews = reviews
        .into_iter()
        .map(|review| ReviewView {
            customer: customers.get(&review.customer_id).cloned(),
            review,
        })
        .collect();

    Ok(ProviderReviews {
        reviews,
        average: mean(&ratings).map(round_one_decimal).unwrap_or(0.0),
        total: ratings.len() as i64,
        breakdown: breakdown(&ratings),
    })
}

pub fn mean(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count per star, five stars first.
pub fn breakdown(ratings: &[i32]) -> Vec<StarCount> {
    (1..=5)
        .rev()
        .map(|stars| StarCount {
            stars,
            count: ratings.iter().filter(|&&r| r == stars).count() as i64,
        })
        .collect()
}
