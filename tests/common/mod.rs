#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DbBackend, EntityTrait, Schema,
    Set,
};
use servicehub_api::{
    dto::{bookings::CreateBookingRequest, providers::UpsertProviderRequest},
    entity::{
        AuditLogs, Bookings, HelpQueries, Providers, Reviews, Users,
        users::ActiveModel as UserActive,
    },
    models::{Role, UserStatus},
    notify::{Notifier, NoopNotifier},
    services::provider_service,
    state::{AppState, Settings},
};
use tokio::sync::Notify;
use uuid::Uuid;

/// Fresh in-memory database with every table created from the entities.
pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_with(Arc::new(NoopNotifier), Settings::default()).await
}

pub async fn setup_state_with(
    notifier: Arc<dyn Notifier>,
    settings: Settings,
) -> anyhow::Result<AppState> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let orm = Database::connect(opts).await?;

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = orm.get_database_backend();
    // Parents first: providers reference users.
    let tables = [
        schema.create_table_from_entity(Users),
        schema.create_table_from_entity(Providers),
        schema.create_table_from_entity(Bookings),
        schema.create_table_from_entity(Reviews),
        schema.create_table_from_entity(HelpQueries),
        schema.create_table_from_entity(AuditLogs),
    ];
    for table in &tables {
        orm.execute(backend.build(table)).await?;
    }

    Ok(AppState {
        orm,
        notifier,
        settings,
    })
}

pub fn strict() -> Settings {
    Settings {
        strict_booking_transitions: true,
        ..Settings::default()
    }
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    email: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        email: Set(email.into()),
        password_hash: Set("not-a-real-hash".into()),
        phone: Set(Some("+15550100".into())),
        address: Set(None),
        profile_image: Set(None),
        role: Set(role.as_str().into()),
        status: Set(UserStatus::Active.as_str().into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

/// A provider user plus its profile. Returns `(user_id, provider_id)`.
pub async fn create_provider(
    state: &AppState,
    name: &str,
    email: &str,
    service: &str,
) -> anyhow::Result<(Uuid, Uuid)> {
    let user_id = create_user(state, name, email, Role::Provider).await?;
    let profile = provider_service::upsert_provider(
        state,
        UpsertProviderRequest {
            user: user_id,
            service: service.into(),
            ..Default::default()
        },
    )
    .await?;
    Ok((user_id, profile.provider.id))
}

pub fn booking_request(customer: Uuid, provider: Uuid) -> CreateBookingRequest {
    CreateBookingRequest {
        customer,
        provider,
        service: "Plumber".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date"),
        time: "10:00".into(),
        address: "123 St".into(),
        amount: 500.0,
    }
}

/// Records each delivery attempt, then fails it. `sms_tried` fires once an
/// SMS has been attempted, which is the last message of a booking alert.
#[derive(Default)]
pub struct FailingNotifier {
    pub attempts: Mutex<Vec<String>>,
    pub sms_tried: Notify,
}

impl FailingNotifier {
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().expect("attempts lock").clone()
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_email(&self, to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
        self.attempts.lock().expect("attempts lock").push(format!("email:{to}"));
        anyhow::bail!("mail relay refused {to}")
    }

    async fn send_sms(&self, to: &str, _body: &str) -> anyhow::Result<()> {
        self.attempts.lock().expect("attempts lock").push(format!("sms:{to}"));
        self.sms_tried.notify_one();
        anyhow::bail!("sms gateway refused {to}")
    }
}

pub async fn count<E: EntityTrait>(state: &AppState) -> anyhow::Result<usize> {
    Ok(E::find().all(&state.orm).await?.len())
}
