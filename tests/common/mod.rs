#![allow(dead_code)]

use food_order_api::{
    config::{AppConfig, PaymentConfig},
    db::{create_pool, run_migrations},
    dto::users::CreateUserRequest,
    middleware::auth::AuthUser,
    services::user_service,
    state::AppState,
};
use rust_decimal::Decimal;
use secrecy::SecretString;

/// Fresh state over an emptied database, or `None` when no database is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE order_items, orders, cart, reviews, user_mapping, menus, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(Some(AppState::new(pool, test_config(&database_url))?))
}

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        max_connections: 5,
        jwt_secret: SecretString::from("test-secret".to_string()),
        jwt_ttl_hours: 1,
        payments: PaymentConfig {
            secret_key: None,
            api_base: "http://127.0.0.1:1".into(),
            client_url: "http://localhost:5173".into(),
            currency: "usd".into(),
        },
    }
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: 0,
        email: "admin@example.com".into(),
        role: "admin".into(),
    }
}

/// A signed-in non-admin, as the auth extractor would produce for `user_id`.
pub fn customer(user_id: i32, email: &str) -> AuthUser {
    AuthUser {
        user_id,
        email: email.into(),
        role: "user".into(),
    }
}

pub async fn create_user(state: &AppState, name: &str, email: &str) -> anyhow::Result<i32> {
    let resp = user_service::create_user(
        state,
        CreateUserRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some("secret123".into()),
            ..Default::default()
        },
    )
    .await?;
    Ok(resp.data.map(|u| u.id).unwrap_or_default())
}

pub async fn create_menu(state: &AppState, name: &str, price: Decimal) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO menus (name, image, description, price) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(format!("https://img.example.com/{id}.jpg", id = name.to_lowercase().replace(' ', "-")))
    .bind(format!("{name} made fresh"))
    .bind(price)
    .fetch_one(&state.pool)
    .await?;
    Ok(id)
}

pub async fn count(state: &AppState, table: &str) -> anyhow::Result<i64> {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.pool)
        .await?;
    Ok(n)
}
