use axum::{Router, extract::State, http::StatusCode, routing::{get, post}};

use crate::{
    dto::orders::{
        AdminOrderList, CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest,
        OrderList, OrderWithItems,
    },
    error::AppResult,
    extract::{Json, Path},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_orders).post(create_order))
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/my-orders/{user_id}", get(list_my_orders))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created and cart emptied", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Missing required order data"),
        (status = 500, description = "Transaction rolled back"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithItems>>)> {
    let resp = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/my-orders/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Orders with their items, newest first", body = ApiResponse<OrderList>),
    ),
    tag = "Orders"
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_my_orders(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Every order with customer details", body = ApiResponse<AdminOrderList>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminOrderList>>> {
    let resp = order_service::list_all_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/create-checkout-session",
    request_body = CheckoutSessionRequest,
    responses(
        (status = 200, description = "Hosted checkout session", body = ApiResponse<CheckoutSessionResponse>),
        (status = 400, description = "Invalid cart"),
        (status = 500, description = "Failed to create payment session"),
    ),
    tag = "Orders"
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> AppResult<Json<ApiResponse<CheckoutSessionResponse>>> {
    let resp = order_service::create_checkout_session(&state, payload).await?;
    Ok(Json(resp))
}
