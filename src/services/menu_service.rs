use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    dto::menus::{CreateMenuRequest, MenuList, PopularMenu, PopularQuery, UpdateMenuRequest},
    entity::menus::{ActiveModel, Column, Entity as Menus},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Menu,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_menus(state: &AppState) -> AppResult<ApiResponse<MenuList>> {
    let items: Vec<Menu> = Menus::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Menu::from)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Menus", MenuList { items }, Some(meta)))
}

pub async fn get_menu(state: &AppState, id: i32) -> AppResult<ApiResponse<Menu>> {
    let menu = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Menu::from)
        .ok_or_else(|| AppError::not_found("Menu not found"))?;
    Ok(ApiResponse::success("Menu", menu, None))
}

/// Menus ranked by how many units have been ordered; never-ordered menus trail.
pub async fn popular_menus(
    state: &AppState,
    query: PopularQuery,
) -> AppResult<ApiResponse<Vec<PopularMenu>>> {
    let items = sqlx::query_as::<_, PopularMenu>(
        r#"
        SELECT m.id, m.name, m.image, m.description, m.price,
               COALESCE(SUM(oi.quantity), 0)::BIGINT AS total_ordered
        FROM menus m
        LEFT JOIN order_items oi ON oi.menu_id = m.id
        GROUP BY m.id
        ORDER BY total_ordered DESC, m.created_at DESC, m.id DESC
        LIMIT $1
        "#,
    )
    .bind(query.limit())
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success("Popular menus", items, None))
}

pub async fn create_menu(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    ensure_admin(user)?;
    let menu = payload.validate()?;

    let created = ActiveModel {
        id: NotSet,
        name: Set(menu.name),
        image: Set(menu.image),
        description: Set(menu.description),
        price: Set(menu.price),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(menu_id = created.id, admin_id = user.user_id, "menu created");
    Ok(ApiResponse::success(
        "Menu created",
        Menu::from(created),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateMenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    ensure_admin(user)?;
    payload.validate()?;

    let existing = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Menu not found"))?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(image) = payload.image {
        active.image = Set(image.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }

    let menu = active.update(&state.orm).await?;

    tracing::info!(menu_id = menu.id, admin_id = user.user_id, "menu updated");
    Ok(ApiResponse::success(
        "Updated",
        Menu::from(menu),
        Some(Meta::empty()),
    ))
}

/// Deleting a menu cascades to cart lines, order items and reviews.
pub async fn delete_menu(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Menu>> {
    ensure_admin(user)?;

    let existing = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Menu not found"))?;

    let result = Menus::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Menu not found"));
    }

    tracing::info!(menu_id = id, admin_id = user.user_id, "menu deleted");
    Ok(ApiResponse::success(
        "Deleted",
        Menu::from(existing),
        Some(Meta::empty()),
    ))
}
