use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::providers::{AttachMediaRequest, ProviderMedia, UpsertProviderRequest},
    error::AppResult,
    middleware::json::ValidatedJson,
    models::ProviderProfile,
    response::ErrorBody,
    services::provider_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_providers).post(upsert_provider))
        .route("/media", post(attach_media))
        .route("/by-user/{user_id}", get(get_provider_by_user))
        .route("/{id}", get(get_provider))
}

#[utoipa::path(
    get,
    path = "/api/providers",
    responses(
        (status = 200, description = "Provider directory", body = Vec<ProviderProfile>),
    ),
    tag = "Providers"
)]
pub async fn list_providers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProviderProfile>>> {
    let resp = provider_service::list_providers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/providers",
    request_body = UpsertProviderRequest,
    responses(
        (status = 200, description = "Provider created or updated", body = ProviderProfile),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Providers"
)]
pub async fn upsert_provider(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpsertProviderRequest>,
) -> AppResult<Json<ProviderProfile>> {
    let resp = provider_service::upsert_provider(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/providers/media",
    request_body = AttachMediaRequest,
    responses(
        (status = 200, description = "Full media list after appending", body = ProviderMedia),
        (status = 400, description = "No files or unknown kind", body = ErrorBody),
        (status = 404, description = "Provider not found", body = ErrorBody),
    ),
    tag = "Providers"
)]
pub async fn attach_media(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AttachMediaRequest>,
) -> AppResult<Json<ProviderMedia>> {
    let resp = provider_service::attach_media(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/providers/by-user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "Provider owned by the user", body = ProviderProfile),
        (status = 404, description = "Provider not found", body = ErrorBody),
    ),
    tag = "Providers"
)]
pub async fn get_provider_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ProviderProfile>> {
    let resp = provider_service::get_provider_by_user(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    params(
        ("id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider", body = ProviderProfile),
        (status = 404, description = "Provider not found", body = ErrorBody),
    ),
    tag = "Providers"
)]
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProviderProfile>> {
    let resp = provider_service::get_provider(&state, id).await?;
    Ok(Json(resp))
}
