use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        bookings::{
            BookingCreated, BookingDetail, CreateBookingRequest, CustomerBooking, ProviderBooking,
            UpdateBookingStatusRequest,
        },
        help::{HelpQueryAccepted, HelpQueryRequest},
        providers::{AttachMediaRequest, MediaKind, ProviderMedia, UpsertProviderRequest},
        reviews::{CreateReviewRequest, ProviderReviews, ReviewSubmitted, ReviewView, StarCount},
        users::{UpdateProfileRequest, UserStatusChanged},
    },
    models::{
        Booking, BookingStatus, Provider, ProviderProfile, Review, Role, User, UserStatus,
        UserSummary,
    },
    response::{ErrorBody, MessageResponse},
    routes::{bookings, health, help, providers, reviews, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::list_by_customer,
        bookings::list_by_provider,
        bookings::update_status,
        bookings::delete_booking,
        reviews::submit_review,
        reviews::provider_reviews,
        providers::list_providers,
        providers::upsert_provider,
        providers::attach_media,
        providers::get_provider_by_user,
        providers::get_provider,
        users::list_users,
        users::get_user,
        users::update_profile,
        users::deactivate_user,
        users::reactivate_user,
        help::submit_help_query
    ),
    components(
        schemas(
            health::HealthData,
            User,
            UserSummary,
            Role,
            UserStatus,
            Provider,
            ProviderProfile,
            Booking,
            BookingStatus,
            Review,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            BookingCreated,
            BookingDetail,
            CustomerBooking,
            ProviderBooking,
            CreateReviewRequest,
            ReviewSubmitted,
            ReviewView,
            StarCount,
            ProviderReviews,
            UpsertProviderRequest,
            AttachMediaRequest,
            MediaKind,
            ProviderMedia,
            UpdateProfileRequest,
            UserStatusChanged,
            HelpQueryRequest,
            HelpQueryAccepted,
            ErrorBody,
            MessageResponse
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Bookings", description = "Booking lifecycle endpoints"),
        (name = "Reviews", description = "Review and rating endpoints"),
        (name = "Providers", description = "Provider directory endpoints"),
        (name = "Users", description = "User administration endpoints"),
        (name = "Help", description = "Help desk endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
