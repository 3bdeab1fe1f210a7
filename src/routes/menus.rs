use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::menus::{CreateMenuRequest, MenuList, PopularMenu, PopularQuery, UpdateMenuRequest},
    error::AppResult,
    extract::{Json, Path, Query},
    middleware::auth::AuthUser,
    models::Menu,
    response::ApiResponse,
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menus).post(create_menu))
        .route("/popular", get(popular_menus))
        .route("/{id}", get(get_menu).put(update_menu).delete(delete_menu))
}

#[utoipa::path(
    get,
    path = "/api/menus",
    responses(
        (status = 200, description = "All menus, newest first", body = ApiResponse<MenuList>)
    ),
    tag = "Menus"
)]
pub async fn list_menus(State(state): State<AppState>) -> AppResult<Json<ApiResponse<MenuList>>> {
    let resp = menu_service::list_menus(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menus/popular",
    params(
        ("limit" = Option<i64>, Query, description = "Number of menus, default 6, max 50")
    ),
    responses(
        (status = 200, description = "Menus ranked by units ordered", body = ApiResponse<Vec<PopularMenu>>)
    ),
    tag = "Menus"
)]
pub async fn popular_menus(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<ApiResponse<Vec<PopularMenu>>>> {
    let resp = menu_service::popular_menus(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Get menu", body = ApiResponse<Menu>),
        (status = 404, description = "Menu not found"),
    ),
    tag = "Menus"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::get_menu(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/menus",
    request_body = CreateMenuRequest,
    responses(
        (status = 201, description = "Create menu", body = ApiResponse<Menu>),
        (status = 400, description = "Missing fields or bad price"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
pub async fn create_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMenuRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Menu>>)> {
    let resp = menu_service::create_menu(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}",
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    request_body = UpdateMenuRequest,
    responses(
        (status = 200, description = "Updated menu", body = ApiResponse<Menu>),
        (status = 404, description = "Menu not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
pub async fn update_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuRequest>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::update_menu(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Deleted menu", body = ApiResponse<Menu>),
        (status = 404, description = "Menu not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menus"
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::delete_menu(&state, &user, id).await?;
    Ok(Json(resp))
}
