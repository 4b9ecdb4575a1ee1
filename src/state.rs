use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, notify::Notifier};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub notifier: Arc<dyn Notifier>,
    pub settings: Settings,
}

/// Request-independent knobs read once at startup.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub strict_booking_transitions: bool,
    pub admin_email: Option<String>,
}

impl From<&AppConfig> for Settings {
    fn from(config: &AppConfig) -> Self {
        Self {
            strict_booking_transitions: config.strict_booking_transitions,
            admin_email: config.admin_email.clone(),
        }
    }
}
