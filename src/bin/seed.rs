use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use servicehub_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    models::{BookingStatus, Role},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "admin123", Role::Admin).await?;
    let customer_id =
        ensure_user(&pool, "Casey Customer", "customer@example.com", "customer123", Role::Customer)
            .await?;
    let owner_id =
        ensure_user(&pool, "Pat Plumber", "provider@example.com", "provider123", Role::Provider)
            .await?;
    let provider_id = ensure_provider(&pool, owner_id, "Plumber").await?;
    seed_booking(&pool, customer_id, provider_id).await?;

    println!(
        "Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}, Provider ID: {provider_id}"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={})", role.as_str());
    Ok(user_id)
}

async fn ensure_provider(pool: &sqlx::PgPool, user_id: Uuid, service: &str) -> anyhow::Result<Uuid> {
    let (provider_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO providers (id, user_id, service, experience, hourly_rate, city)
        VALUES ($1, $2, $3, '5 years', '400', 'Pune')
        ON CONFLICT (user_id) DO UPDATE SET service = EXCLUDED.service
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(service)
    .fetch_one(pool)
    .await?;

    println!("Ensured provider profile for {user_id} ({service})");
    Ok(provider_id)
}

async fn seed_booking(pool: &sqlx::PgPool, customer_id: Uuid, provider_id: Uuid) -> anyhow::Result<()> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM bookings WHERE customer_id = $1 AND provider_id = $2")
            .bind(customer_id)
            .bind(provider_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        println!("Sample booking already present");
        return Ok(());
    }

    let date = (Utc::now() + Duration::days(3)).date_naive();
    sqlx::query(
        r#"
        INSERT INTO bookings (id, customer_id, provider_id, service, date, time, address, amount, status)
        VALUES ($1, $2, $3, 'Plumber', $4, '10:00', '123 Main St', 500, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .bind(provider_id)
    .bind(date)
    .bind(BookingStatus::Pending.as_str())
    .execute(pool)
    .await?;

    println!("Seeded sample booking");
    Ok(())
}
