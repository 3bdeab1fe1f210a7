use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    dto::cart::{
        AddToCartRequest, CartList, CartLine, CartQuery, CartUpsert, ClearCartResult,
        UpdateCartQuantityRequest,
    },
    entity::{
        cart::{Column as CartCol, Entity as Cart},
        menus::Entity as Menus,
        users::Entity as Users,
    },
    error::{AppError, AppResult, is_out_of_range},
    models::CartItem,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_cart(state: &AppState, query: CartQuery) -> AppResult<ApiResponse<CartList>> {
    let user_id = query.user_id()?;

    let items = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT c.id, c.user_id, c.menu_id, c.quantity, c.created_at, c.updated_at,
               m.name AS menu_name,
               m.image AS menu_image,
               m.description AS menu_description,
               m.price AS menu_price,
               (m.price * c.quantity) AS total_price
        FROM cart c
        JOIN menus m ON m.id = c.menu_id
        WHERE c.user_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

/// Add a menu to the user's cart, or bump the quantity of the existing line.
///
/// The increment is a single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent
/// adds for the same (user, menu) pair never lose an update.
pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<(StatusCode, ApiResponse<CartItem>)> {
    let line = payload.validate()?;

    if Users::find_by_id(line.user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }
    if Menus::find_by_id(line.menu_id).one(&state.orm).await?.is_none() {
        return Err(AppError::not_found("Menu item not found"));
    }

    let upsert = sqlx::query_as::<_, CartUpsert>(
        r#"
        INSERT INTO cart (user_id, menu_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, menu_id) DO UPDATE
        SET quantity = cart.quantity + EXCLUDED.quantity,
            updated_at = NOW()
        RETURNING id, user_id, menu_id, quantity, created_at, updated_at,
                  (xmax = 0) AS inserted
        "#,
    )
    .bind(line.user_id)
    .bind(line.menu_id)
    .bind(line.quantity)
    .fetch_one(&state.pool)
    .await
    .map_err(|err| {
        // the summed quantity no longer fits an INTEGER column
        if is_out_of_range(&err) {
            AppError::validation("Quantity is too large")
        } else {
            err.into()
        }
    })?;

    tracing::info!(
        user_id = line.user_id,
        menu_id = line.menu_id,
        quantity = upsert.item.quantity,
        inserted = upsert.inserted,
        "cart updated"
    );

    Ok(if upsert.inserted {
        (
            StatusCode::CREATED,
            ApiResponse::success("Item added to cart successfully", upsert.item, None),
        )
    } else {
        (
            StatusCode::OK,
            ApiResponse::success("Cart updated successfully", upsert.item, None),
        )
    })
}

pub async fn update_quantity(
    state: &AppState,
    cart_id: i32,
    payload: UpdateCartQuantityRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = payload.validate()?;

    let item = sqlx::query_as::<_, CartItem>(
        r#"
        UPDATE cart
        SET quantity = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, user_id, menu_id, quantity, created_at, updated_at
        "#,
    )
    .bind(cart_id)
    .bind(quantity)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::not_found("Cart item not found"))?;

    tracing::info!(cart_id, quantity, "cart quantity set");
    Ok(ApiResponse::success(
        "Cart quantity updated successfully",
        item,
        None,
    ))
}

pub async fn remove_line(state: &AppState, cart_id: i32) -> AppResult<ApiResponse<CartItem>> {
    let existing = Cart::find_by_id(cart_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;

    let result = Cart::delete_by_id(cart_id).exec(&state.orm).await?;
    // lost a race with another delete
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Cart item not found"));
    }

    tracing::info!(cart_id, user_id = existing.user_id, "cart line removed");
    Ok(ApiResponse::success(
        "Item removed from cart successfully",
        CartItem::from(existing),
        None,
    ))
}

pub async fn clear_cart(state: &AppState, user_id: i32) -> AppResult<ApiResponse<ClearCartResult>> {
    if user_id <= 0 {
        return Err(AppError::validation("Invalid User ID"));
    }

    let result = Cart::delete_many()
        .filter(CartCol::UserId.eq(user_id))
        .exec(&state.orm)
        .await?;

    tracing::info!(user_id, removed = result.rows_affected, "cart cleared");
    Ok(ApiResponse::success(
        "Cart cleared successfully",
        ClearCartResult {
            removed: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}
