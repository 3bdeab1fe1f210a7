use food_order_api::{
    db::{DbPool, create_pool, run_migrations},
    dto::users::{ADMIN_ROLE, DEFAULT_ROLE, DEFAULT_USER_IMAGE},
    services::user_service::hash_password,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")?;

    let pool = create_pool(&database_url, 2).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "admin123", ADMIN_ROLE).await?;
    let user_id = ensure_user(&pool, "Demo User", "user@example.com", "user123", DEFAULT_ROLE).await?;
    seed_menus(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<i32> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, image, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(DEFAULT_USER_IMAGE)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}

async fn seed_menus(pool: &DbPool) -> anyhow::Result<()> {
    let menus = [
        (
            "Margherita Pizza",
            "https://images.example.com/margherita.jpg",
            "Tomato, mozzarella and fresh basil",
            Decimal::new(1250, 2),
        ),
        (
            "Chicken Biryani",
            "https://images.example.com/biryani.jpg",
            "Fragrant basmati rice with spiced chicken",
            Decimal::new(1499, 2),
        ),
        (
            "Caesar Salad",
            "https://images.example.com/caesar.jpg",
            "Romaine, parmesan, croutons and caesar dressing",
            Decimal::new(899, 2),
        ),
        (
            "Chocolate Lava Cake",
            "https://images.example.com/lava-cake.jpg",
            "Warm chocolate cake with a molten centre",
            Decimal::new(650, 2),
        ),
    ];

    // menus carry no unique name, so skip rows that are already present
    for (name, image, description, price) in menus {
        sqlx::query(
            r#"
            INSERT INTO menus (name, image, description, price)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM menus WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(image)
        .bind(description)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded menus");
    Ok(())
}
