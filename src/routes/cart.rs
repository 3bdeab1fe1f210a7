use axum::{Router, extract::State, http::StatusCode, routing::{delete, get, patch}};

use crate::{
    dto::cart::{
        AddToCartRequest, CartList, CartQuery, ClearCartResult, UpdateCartQuantityRequest,
    },
    error::AppResult,
    extract::{Json, Path, Query},
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart))
        .route("/{id}", patch(update_quantity).delete(remove_from_cart))
        .route("/user/{user_id}/clear", delete(clear_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("userId" = String, Query, description = "Owner of the cart")
    ),
    responses(
        (status = 200, description = "Cart lines joined with their menus", body = ApiResponse<CartList>),
        (status = 400, description = "Missing or malformed user id"),
    ),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "New cart line", body = ApiResponse<CartItem>),
        (status = 200, description = "Quantity added to existing line", body = ApiResponse<CartItem>),
        (status = 400, description = "Bad request"),
        (status = 404, description = "User or menu not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartItem>>)> {
    let (status, resp) = cart_service::add_to_cart(&state, payload).await?;
    Ok((status, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{id}",
    params(
        ("id" = i32, Path, description = "Cart line ID")
    ),
    request_body = UpdateCartQuantityRequest,
    responses(
        (status = 200, description = "Quantity set", body = ApiResponse<CartItem>),
        (status = 400, description = "Bad quantity"),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCartQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::update_quantity(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    params(
        ("id" = i32, Path, description = "Cart line ID")
    ),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::remove_line(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/user/{user_id}/clear",
    params(
        ("user_id" = i32, Path, description = "Owner of the cart")
    ),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<ClearCartResult>),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ClearCartResult>>> {
    let resp = cart_service::clear_cart(&state, user_id).await?;
    Ok(Json(resp))
}
