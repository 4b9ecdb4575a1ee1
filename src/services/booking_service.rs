use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::bookings::{
        BookingCreated, BookingDetail, CreateBookingRequest, CustomerBooking, ProviderBooking,
        UpdateBookingStatusRequest,
    },
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings},
        providers::Entity as Providers,
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{Booking, BookingStatus},
    notify::{self, Outgoing},
    response::MessageResponse,
    services::directory::{booking_from_entity, provider_profiles, user_summaries},
    state::AppState,
};

pub const BOOKING_NOT_FOUND: &str = "Booking not found.";

pub async fn create_booking(
    state: &AppState,
    payload: CreateBookingRequest,
) -> AppResult<BookingCreated> {
    let now = Utc::now();
    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(payload.customer),
        provider_id: Set(payload.provider),
        service: Set(payload.service),
        date: Set(payload.date),
        time: Set(payload.time),
        address: Set(payload.address),
        amount: Set(payload.amount),
        status: Set(BookingStatus::Pending.as_str().into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    let booking = booking_from_entity(booking)?;

    audit::record(
        &state.orm,
        Some(booking.customer_id),
        "booking_created",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "provider_id": booking.provider_id }),
    )
    .await;

    notify_provider(state, &booking);

    Ok(BookingCreated {
        message: "Booking created successfully".into(),
        booking,
    })
}

/// Overwrite a booking's status.
///
/// Unless strict transitions are enabled this is last-write-wins: any status
/// may replace any other.
pub async fn set_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateBookingStatusRequest,
) -> AppResult<Booking> {
    let next = payload.status;
    let existing = Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(BOOKING_NOT_FOUND))?;

    if state.settings.strict_booking_transitions {
        let current: BookingStatus = existing
            .status
            .parse()
            .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
        if !current.can_transition_to(next) {
            let reason = if current.is_terminal() {
                format!("Booking is already {current}")
            } else {
                format!("Cannot change booking status from {current} to {next}")
            };
            return Err(AppError::Conflict(reason));
        }
    }

    let previous = existing.status.clone();
    let mut active: BookingActive = existing.into();
    active.status = Set(next.as_str().into());
    active.updated_at = Set(Utc::now().into());
    let booking = booking_from_entity(active.update(&state.orm).await?)?;

    tracing::debug!(booking_id = %booking.id, from = %previous, to = %next, "booking status changed");
    audit::record(
        &state.orm,
        None,
        "booking_status_update",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "from": previous, "to": next }),
    )
    .await;

    Ok(booking)
}

pub async fn list_all(state: &AppState) -> AppResult<Vec<BookingDetail>> {
    let bookings = Bookings::find()
        .order_by_desc(BookingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let customers = user_summaries(&state.orm, bookings.iter().map(|b| b.customer_id)).await?;
    let providers = provider_profiles(&state.orm, bookings.iter().map(|b| b.provider_id)).await?;

    Ok(bookings
        .into_iter()
        .map(|booking| BookingDetail {
            customer: customers.get(&booking.customer_id).cloned(),
            provider: providers.get(&booking.provider_id).cloned(),
            booking,
        })
        .collect())
}

pub async fn list_by_customer(
    state: &AppState,
    customer_id: Uuid,
) -> AppResult<Vec<CustomerBooking>> {
    let bookings = Bookings::find()
        .filter(BookingCol::CustomerId.eq(customer_id))
        .order_by_desc(BookingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let providers = provider_profiles(&state.orm, bookings.iter().map(|b| b.provider_id)).await?;

    Ok(bookings
        .into_iter()
        .map(|booking| CustomerBooking {
            provider: providers.get(&booking.provider_id).cloned(),
            booking,
        })
        .collect())
}

pub async fn list_by_provider(
    state: &AppState,
    provider_id: Uuid,
) -> AppResult<Vec<ProviderBooking>> {
    let bookings = Bookings::find()
        .filter(BookingCol::ProviderId.eq(provider_id))
        .order_by_desc(BookingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let customers = user_summaries(&state.orm, bookings.iter().map(|b| b.customer_id)).await?;

    Ok(bookings
        .into_iter()
        .map(|booking| ProviderBooking {
            customer: customers.get(&booking.customer_id).cloned(),
            booking,
        })
        .collect())
}

pub async fn delete_booking(state: &AppState, id: Uuid) -> AppResult<MessageResponse> {
    let result = Bookings::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(BOOKING_NOT_FOUND));
    }

    audit::record(
        &state.orm,
        None,
        "booking_deleted",
        "bookings",
        serde_json::json!({ "booking_id": id }),
    )
    .await;

    Ok(MessageResponse::new("Booking deleted successfully."))
}

/// Where a provider can be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderContact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Provider contact fields, falling back to the owning user's.
pub async fn provider_contact<C: ConnectionTrait>(
    conn: &C,
    provider_id: Uuid,
) -> AppResult<Option<ProviderContact>> {
    let Some(provider) = Providers::find_by_id(provider_id).one(conn).await? else {
        return Ok(None);
    };
    let owner = Users::find_by_id(provider.user_id).one(conn).await?;

    Ok(Some(ProviderContact {
        email: provider
            .email
            .filter(|e| !e.is_empty())
            .or_else(|| owner.as_ref().map(|u| u.email.clone())),
        phone: provider
            .phone
            .filter(|p| !p.is_empty())
            .or_else(|| owner.and_then(|u| u.phone)),
    }))
}

pub fn booking_messages(contact: &ProviderContact, booking: &Booking) -> Vec<Outgoing> {
    let summary = format!(
        "New booking request: {} on {} at {}, {}. Amount: {}.",
        booking.service, booking.date, booking.time, booking.address, booking.amount
    );

    let mut messages = Vec::new();
    if let Some(email) = &contact.email {
        messages.push(Outgoing::Email {
            to: email.clone(),
            subject: format!("New booking for {}", booking.service),
            body: summary.clone(),
        });
    }
    if let Some(phone) = &contact.phone {
        messages.push(Outgoing::Sms {
            to: phone.clone(),
            body: summary,
        });
    }
    messages
}

/// Tell the provider about a new booking on a detached task. Nothing that
/// happens there reaches the caller.
fn notify_provider(state: &AppState, booking: &Booking) {
    let conn = state.orm.clone();
    let notifier = state.notifier.clone();
    let booking = booking.clone();

    tokio::spawn(async move {
        match provider_contact(&conn, booking.provider_id).await {
            Ok(Some(contact)) => {
                notify::deliver(notifier.as_ref(), booking_messages(&contact, &booking)).await
            }
            Ok(None) => {
                tracing::debug!(provider_id = %booking.provider_id, "provider not found, skipping notification")
            }
            Err(err) => tracing::warn!(error = %err, "could not resolve provider contact"),
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn booking() -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            service: "Plumber".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            time: "10:00".into(),
            address: "123 St".into(),
            amount: 500.0,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn messages_follow_available_channels() {
        let both = ProviderContact {
            email: Some("pro@example.com".into()),
            phone: Some("+15550100".into()),
        };
        let messages = booking_messages(&both, &booking());
        assert_eq!(messages.len(), 2);
        assert!(matches!(&messages[0], Outgoing::Email { to, .. } if to == "pro@example.com"));
        assert!(matches!(&messages[1], Outgoing::Sms { to, body } if to == "+15550100" && body.contains("2025-01-10")));

        let email_only = ProviderContact {
            email: Some("pro@example.com".into()),
            phone: None,
        };
        assert_eq!(booking_messages(&email_only, &booking()).len(), 1);
        assert!(booking_messages(&ProviderContact::default(), &booking()).is_empty());
    }
}
