use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::providers::{AttachMediaRequest, MediaKind, ProviderMedia, UpsertProviderRequest},
    entity::{
        providers::{
            ActiveModel as ProviderActive, Column as ProviderCol, Entity as Providers,
            Model as ProviderModel,
        },
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::ProviderProfile,
    services::directory::{paths_from_json, paths_to_json, with_owners},
    state::AppState,
};

pub const PROVIDER_NOT_FOUND: &str = "Provider not found";
pub const USER_NOT_FOUND: &str = "User not found";

pub async fn list_providers(state: &AppState) -> AppResult<Vec<ProviderProfile>> {
    let providers = Providers::find()
        .order_by_desc(ProviderCol::CreatedAt)
        .all(&state.orm)
        .await?;
    with_owners(&state.orm, providers).await
}

pub async fn get_provider(state: &AppState, id: Uuid) -> AppResult<ProviderProfile> {
    let provider = Providers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(PROVIDER_NOT_FOUND))?;
    profile(state, provider).await
}

pub async fn get_provider_by_user(state: &AppState, user_id: Uuid) -> AppResult<ProviderProfile> {
    let provider = Providers::find()
        .filter(ProviderCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(PROVIDER_NOT_FOUND))?;
    profile(state, provider).await
}

/// Create the provider profile owned by `payload.user`, or update it in place.
///
/// Omitted fields keep their stored value on update. The rating is derived
/// from reviews and cannot be set here.
pub async fn upsert_provider(
    state: &AppState,
    payload: UpsertProviderRequest,
) -> AppResult<ProviderProfile> {
    if Users::find_by_id(payload.user).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound(USER_NOT_FOUND));
    }

    let existing = Providers::find()
        .filter(ProviderCol::UserId.eq(payload.user))
        .one(&state.orm)
        .await?;
    let created = existing.is_none();

    let mut active: ProviderActive = match existing {
        Some(model) => model.into(),
        None => ProviderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(payload.user),
            rating: Set(0.0),
            total_jobs: Set(0),
            completed_jobs: Set(0),
            earnings: Set(0),
            id_proofs: Set(paths_to_json(&[])),
            certificates: Set(paths_to_json(&[])),
            work_photos: Set(paths_to_json(&[])),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        },
    };
    apply_profile(&mut active, payload, created);

    let provider = if created {
        active.insert(&state.orm).await?
    } else {
        active.update(&state.orm).await?
    };

    audit::record(
        &state.orm,
        Some(provider.user_id),
        "provider_upsert",
        "providers",
        serde_json::json!({ "provider_id": provider.id, "created": created }),
    )
    .await;

    profile(state, provider).await
}

/// Append already-uploaded file paths to one of the provider's media lists.
pub async fn attach_media(
    state: &AppState,
    payload: AttachMediaRequest,
) -> AppResult<ProviderMedia> {
    let provider = Providers::find()
        .filter(ProviderCol::UserId.eq(payload.user))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(PROVIDER_NOT_FOUND))?;

    let current = match payload.kind {
        MediaKind::IdProof => provider.id_proofs.clone(),
        MediaKind::Certificates => provider.certificates.clone(),
        MediaKind::WorkPhotos => provider.work_photos.clone(),
    };
    let mut files = paths_from_json(current);
    files.extend(payload.files);
    let value = paths_to_json(&files);

    let mut active: ProviderActive = provider.into();
    match payload.kind {
        MediaKind::IdProof => active.id_proofs = Set(value),
        MediaKind::Certificates => active.certificates = Set(value),
        MediaKind::WorkPhotos => active.work_photos = Set(value),
    }
    let provider = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(provider.user_id),
        "provider_media_attached",
        "providers",
        serde_json::json!({ "provider_id": provider.id, "kind": payload.kind, "count": files.len() }),
    )
    .await;

    Ok(ProviderMedia {
        kind: payload.kind,
        files,
    })
}

async fn profile(state: &AppState, provider: ProviderModel) -> AppResult<ProviderProfile> {
    with_owners(&state.orm, vec![provider])
        .await?
        .pop()
        .ok_or(AppError::NotFound(PROVIDER_NOT_FOUND))
}

fn apply_profile(active: &mut ProviderActive, payload: UpsertProviderRequest, created: bool) {
    fn keep_or_set(slot: &mut sea_orm::ActiveValue<Option<String>>, value: Option<String>) {
        if let Some(value) = value {
            *slot = Set(Some(value));
        }
    }

    active.service = Set(payload.service);
    keep_or_set(&mut active.experience, payload.experience);
    keep_or_set(&mut active.hourly_rate, payload.hourly_rate);
    keep_or_set(&mut active.skills, payload.skills);
    keep_or_set(&mut active.description, payload.description);
    keep_or_set(&mut active.location, payload.location);
    keep_or_set(&mut active.profile_image, payload.profile_image);
    keep_or_set(&mut active.email, payload.email);
    keep_or_set(&mut active.phone, payload.phone);
    keep_or_set(&mut active.address, payload.address);
    keep_or_set(&mut active.city, payload.city);
    keep_or_set(&mut active.state, payload.state);

    if let Some(total_jobs) = payload.total_jobs {
        active.total_jobs = Set(total_jobs);
    }
    if let Some(completed_jobs) = payload.completed_jobs {
        active.completed_jobs = Set(completed_jobs);
    }
    if let Some(earnings) = payload.earnings {
        active.earnings = Set(earnings);
    }

    // Optional text columns left NotSet would be omitted from the INSERT.
    if created {
        for slot in [
            &mut active.experience,
            &mut active.hourly_rate,
            &mut active.skills,
            &mut active.description,
            &mut active.location,
            &mut active.profile_image,
            &mut active.email,
            &mut active.phone,
            &mut active.address,
            &mut active.city,
            &mut active.state,
        ] {
            if slot.is_not_set() {
                *slot = Set(None);
            }
        }
    }
}
