use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::stats::AdminStats,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::stats_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(admin_stats))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard totals", body = ApiResponse<AdminStats>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn admin_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminStats>>> {
    let resp = stats_service::admin_stats(&state, &user).await?;
    Ok(Json(resp))
}
