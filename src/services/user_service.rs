use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{UpdateProfileRequest, UserStatusChanged},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    models::{User, UserStatus},
    services::directory::user_from_entity,
    state::AppState,
};

pub const USER_NOT_FOUND: &str = "User not found";

pub async fn list_users(state: &AppState) -> AppResult<Vec<User>> {
    Users::find()
        .order_by_desc(UserCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect()
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<User> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;
    user_from_entity(user)
}

pub async fn update_profile(
    state: &AppState,
    id: Uuid,
    payload: UpdateProfileRequest,
) -> AppResult<User> {
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    let untouched = payload.name.is_none()
        && payload.email.is_none()
        && payload.phone.is_none()
        && payload.address.is_none()
        && payload.profile_image.is_none();
    if untouched {
        return user_from_entity(existing);
    }

    if let Some(email) = payload.email.as_deref().filter(|e| *e != existing.email) {
        let taken = Users::find()
            .filter(UserCol::Email.eq(email))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest("Email is already taken".to_string()));
        }
    }

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(profile_image) = payload.profile_image {
        active.profile_image = Set(Some(profile_image));
    }

    let user = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_profile_update",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    user_from_entity(user)
}

/// Soft-deactivate a user. Users are never deleted.
pub async fn deactivate_user(state: &AppState, id: Uuid) -> AppResult<UserStatusChanged> {
    let user = set_status(state, id, UserStatus::Inactive).await?;
    Ok(UserStatusChanged {
        message: "User deactivated (inactive) successfully.".into(),
        user,
    })
}

pub async fn reactivate_user(state: &AppState, id: Uuid) -> AppResult<UserStatusChanged> {
    let user = set_status(state, id, UserStatus::Active).await?;
    Ok(UserStatusChanged {
        message: "User reactivated successfully.".into(),
        user,
    })
}

async fn set_status(state: &AppState, id: Uuid, status: UserStatus) -> AppResult<User> {
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User not found."))?;

    let mut active: UserActive = existing.into();
    active.status = Set(status.as_str().into());
    let user = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        None,
        "user_status_update",
        "users",
        serde_json::json!({ "user_id": user.id, "status": status }),
    )
    .await;

    user_from_entity(user)
}
