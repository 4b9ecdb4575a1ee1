use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use crate::{
    dto::help::{HelpQueryAccepted, HelpQueryRequest},
    error::{AppError, AppResult},
    response::ErrorBody,
    services::help_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_help_query))
}

#[utoipa::path(
    post,
    path = "/api/help",
    request_body = HelpQueryRequest,
    responses(
        (status = 200, description = "Query stored, admin notified", body = HelpQueryAccepted),
        (status = 400, description = "Email and message are required", body = ErrorBody),
    ),
    tag = "Help"
)]
pub async fn submit_help_query(
    State(state): State<AppState>,
    payload: Result<Json<HelpQueryRequest>, JsonRejection>,
) -> AppResult<Json<HelpQueryAccepted>> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let resp = help_service::submit_help_query(&state, payload).await?;
    Ok(Json(resp))
}
