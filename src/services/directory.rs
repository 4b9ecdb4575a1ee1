//! Read-side population: resolve the user and provider ids that records carry
//! into inline identities, one batched query per referenced table.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    entity::{
        bookings::Model as BookingModel,
        help_queries::Model as HelpQueryModel,
        providers::{Column as ProviderCol, Entity as Providers, Model as ProviderModel},
        reviews::Model as ReviewModel,
        users::{Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::{Booking, HelpQuery, Provider, ProviderProfile, Review, User, UserSummary},
};

pub async fn user_summaries<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, UserSummary>> {
    let ids: HashSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = Users::find()
        .filter(UserCol::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(users
        .iter()
        .map(|user| (user.id, user_summary(user)))
        .collect())
}

pub async fn provider_profiles<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, ProviderProfile>> {
    let ids: HashSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let providers = Providers::find()
        .filter(ProviderCol::Id.is_in(ids))
        .all(conn)
        .await?;
    let profiles = with_owners(conn, providers).await?;

    Ok(profiles
        .into_iter()
        .map(|profile| (profile.provider.id, profile))
        .collect())
}

/// Attach the owning user's summary to each provider, keeping input order.
pub async fn with_owners<C: ConnectionTrait>(
    conn: &C,
    providers: Vec<ProviderModel>,
) -> AppResult<Vec<ProviderProfile>> {
    let owners = user_summaries(conn, providers.iter().map(|p| p.user_id)).await?;

    Ok(providers
        .into_iter()
        .map(|provider| {
            let user = owners.get(&provider.user_id).cloned();
            ProviderProfile {
                provider: provider_from_entity(provider),
                user,
            }
        })
        .collect())
}

pub fn user_summary(model: &UserModel) -> UserSummary {
    UserSummary {
        id: model.id,
        name: model.name.clone(),
        email: model.email.clone(),
        phone: model.phone.clone(),
    }
}

pub fn user_from_entity(model: UserModel) -> AppResult<User> {
    let role = model.role.parse().map_err(corrupt)?;
    let status = model.status.parse().map_err(corrupt)?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        profile_image: model.profile_image,
        role,
        status,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

pub fn provider_from_entity(model: ProviderModel) -> Provider {
    Provider {
        id: model.id,
        user_id: model.user_id,
        service: model.service,
        experience: model.experience,
        hourly_rate: model.hourly_rate,
        skills: model.skills,
        description: model.description,
        location: model.location,
        profile_image: model.profile_image,
        email: model.email,
        phone: model.phone,
        address: model.address,
        city: model.city,
        state: model.state,
        rating: model.rating,
        total_jobs: model.total_jobs,
        completed_jobs: model.completed_jobs,
        earnings: model.earnings,
        id_proofs: paths_from_json(model.id_proofs),
        certificates: paths_from_json(model.certificates),
        work_photos: paths_from_json(model.work_photos),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn booking_from_entity(model: BookingModel) -> AppResult<Booking> {
    let status = model.status.parse().map_err(corrupt)?;
    Ok(Booking {
        id: model.id,
        customer_id: model.customer_id,
        provider_id: model.provider_id,
        service: model.service,
        date: model.date,
        time: model.time,
        address: model.address,
        amount: model.amount,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        provider_id: model.provider_id,
        customer_id: model.customer_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn help_query_from_entity(model: HelpQueryModel) -> HelpQuery {
    HelpQuery {
        id: model.id,
        email: model.email,
        message: model.message,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn paths_from_json(value: Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

pub fn paths_to_json(paths: &[String]) -> Value {
    Value::from(paths.to_vec())
}

fn corrupt(message: String) -> AppError {
    AppError::Internal(anyhow::anyhow!("stored record is invalid: {message}"))
}
