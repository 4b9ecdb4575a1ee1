use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Booking, BookingStatus, ProviderProfile, UserSummary};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub customer: Uuid,
    pub provider: Uuid,
    #[validate(length(min = 1, message = "service is required"))]
    pub service: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCreated {
    pub message: String,
    pub booking: Booking,
}

/// Booking as seen by its customer: the provider is resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub provider: Option<ProviderProfile>,
}

/// Booking as seen by its provider: the customer is resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub customer: Option<UserSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub customer: Option<UserSummary>,
    pub provider: Option<ProviderProfile>,
}
