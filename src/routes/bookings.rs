use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
};
use uuid::Uuid;

use crate::{
    dto::bookings::{
        BookingCreated, BookingDetail, CreateBookingRequest, CustomerBooking, ProviderBooking,
        UpdateBookingStatusRequest,
    },
    error::AppResult,
    middleware::json::ValidatedJson,
    models::Booking,
    response::{ErrorBody, MessageResponse},
    services::booking_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/customer/{customer_id}", get(list_by_customer))
        .route("/provider/{provider_id}", get(list_by_provider))
        .route("/status/{id}", patch(update_status))
        .route("/{id}", delete(delete_booking))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created with status pending", body = BookingCreated),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingCreated>)> {
    let resp = booking_service::create_booking(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Every booking with customer and provider resolved", body = Vec<BookingDetail>),
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Json<Vec<BookingDetail>>> {
    let resp = booking_service::list_all(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/customer/{customer_id}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer user ID")
    ),
    responses(
        (status = 200, description = "Bookings made by a customer", body = Vec<CustomerBooking>),
    ),
    tag = "Bookings"
)]
pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<Vec<CustomerBooking>>> {
    let resp = booking_service::list_by_customer(&state, customer_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/provider/{provider_id}",
    params(
        ("provider_id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Bookings received by a provider", body = Vec<ProviderBooking>),
    ),
    tag = "Bookings"
)]
pub async fn list_by_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProviderBooking>>> {
    let resp = booking_service::list_by_provider(&state, provider_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/status/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Updated booking", body = Booking),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
        (status = 409, description = "Transition not allowed (strict mode)", body = ErrorBody),
    ),
    tag = "Bookings"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingStatusRequest>,
) -> AppResult<Json<Booking>> {
    let resp = booking_service::set_status(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 404, description = "Booking not found", body = ErrorBody),
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = booking_service::delete_booking(&state, id).await?;
    Ok(Json(resp))
}
