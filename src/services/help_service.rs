use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use crate::{
    dto::help::{HelpQueryAccepted, HelpQueryRequest},
    entity::help_queries::ActiveModel as HelpQueryActive,
    error::{AppError, AppResult},
    notify::{self, Outgoing},
    services::directory::help_query_from_entity,
    state::AppState,
};

pub async fn submit_help_query(
    state: &AppState,
    payload: HelpQueryRequest,
) -> AppResult<HelpQueryAccepted> {
    let email = payload.email.trim().to_string();
    let message = payload.message.trim().to_string();
    if email.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest("Email and message are required".into()));
    }

    let query = HelpQueryActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        message: Set(message),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    let query = help_query_from_entity(query);

    match state.settings.admin_email.clone() {
        Some(admin) => {
            let notifier = state.notifier.clone();
            let outgoing = Outgoing::Email {
                to: admin,
                subject: format!("New Help Query from {}", query.email),
                body: format!(
                    "You have a new help query:\n\nEmail: {}\nMessage: {}",
                    query.email, query.message
                ),
            };
            tokio::spawn(async move { notify::deliver(notifier.as_ref(), vec![outgoing]).await });
        }
        None => tracing::debug!(query_id = %query.id, "ADMIN_EMAIL not set, help query stored only"),
    }

    Ok(HelpQueryAccepted {
        success: true,
        message: "Query sent successfully.".into(),
    })
}
