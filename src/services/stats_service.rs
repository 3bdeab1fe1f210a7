use rust_decimal::Decimal;

use crate::{
    dto::stats::AdminStats,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    state::AppState,
};

pub async fn admin_stats(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<AdminStats>> {
    ensure_admin(user)?;
    let stats = collect(state).await?;
    Ok(ApiResponse::success("OK", stats, None))
}

/// The four aggregates are independent, so they run concurrently on the pool.
pub async fn collect(state: &AppState) -> AppResult<AdminStats> {
    let pool = &state.pool;
    let (users, products, orders, revenue) = tokio::try_join!(
        sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM users").fetch_one(pool),
        sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM menus").fetch_one(pool),
        sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM orders").fetch_one(pool),
        sqlx::query_scalar::<_, Option<Decimal>>("SELECT SUM(total_amount) FROM orders")
            .fetch_one(pool),
    )?;

    Ok(AdminStats {
        users: users.unwrap_or(0),
        products: products.unwrap_or(0),
        orders: orders.unwrap_or(0),
        revenue: revenue.unwrap_or(Decimal::ZERO),
    })
}
