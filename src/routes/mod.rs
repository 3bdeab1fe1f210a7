use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{response::ApiResponse, state::AppState};

pub mod cart;
pub mod doc;
pub mod health;
pub mod menus;
pub mod orders;
pub mod reviews;
pub mod stats;
pub mod users;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart::router())
        .nest("/menus", menus::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
        .nest("/users", users::router())
        .nest("/stats", stats::router())
}

/// Every route with state attached. Transport layers are added in main.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    let body = ApiResponse::failure(
        "Not Found",
        Some(format!("No route for {}", uri.path())),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
