mod common;

use axum::http::StatusCode;
use food_order_api::{
    dto::cart::{AddToCartRequest, CartQuery, UpdateCartQuantityRequest},
    error::{AppError, AppResult},
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};
use rust_decimal::Decimal;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn adding_the_same_menu_twice_increments_one_line() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user_id = common::create_user(&state, "Ana", "ana@example.com").await?;
    let menu_id = common::create_menu(&state, "Pad Thai", Decimal::new(1050, 2)).await?;

    let add = || AddToCartRequest {
        user_id: Some(user_id),
        menu_id: Some(menu_id),
        quantity: Some(2),
    };

    let (status, resp) = cart_service::add_to_cart(&state, add()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp.message, "Item added to cart successfully");
    let line = resp.data.expect("cart line");
    assert_eq!(line.quantity, 2);

    let (status, resp) = cart_service::add_to_cart(&state, add()).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp.message, "Cart updated successfully");
    assert_eq!(resp.data.expect("cart line").quantity, 4);

    let listed = cart_service::list_cart(
        &state,
        CartQuery {
            user_id: Some(user_id.to_string()),
        },
    )
    .await?;
    assert_eq!(listed.meta.and_then(|m| m.total), Some(1));
    let lines = listed.data.expect("cart list").items;
    assert_eq!(lines[0].menu_name, "Pad Thai");
    assert_eq!(lines[0].total_price, Decimal::new(4200, 2));

    let rejected = cart_service::update_quantity(
        &state,
        line.id,
        UpdateCartQuantityRequest { quantity: Some(0) },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));

    let (quantity,): (i32,) = sqlx::query_as("SELECT quantity FROM cart WHERE id = $1")
        .bind(line.id)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(quantity, 4);

    let updated = cart_service::update_quantity(
        &state,
        line.id,
        UpdateCartQuantityRequest { quantity: Some(1) },
    )
    .await?;
    assert_eq!(updated.data.expect("cart line").quantity, 1);

    Ok(())
}

async fn add_one(
    state: &AppState,
    user_id: i32,
    menu_id: i32,
) -> AppResult<(StatusCode, ApiResponse<CartItem>)> {
    cart_service::add_to_cart(
        state,
        AddToCartRequest {
            user_id: Some(user_id),
            menu_id: Some(menu_id),
            quantity: Some(1),
        },
    )
    .await
}

#[tokio::test]
#[serial]
async fn concurrent_adds_do_not_lose_quantity() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user_id = common::create_user(&state, "Ben", "ben@example.com").await?;
    let menu_id = common::create_menu(&state, "Ramen", Decimal::new(1300, 2)).await?;

    let (a, b, c) = tokio::join!(
        add_one(&state, user_id, menu_id),
        add_one(&state, user_id, menu_id),
        add_one(&state, user_id, menu_id),
    );
    let created = [a?, b?, c?]
        .into_iter()
        .filter(|(status, _)| *status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);

    let (lines, quantity): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(quantity), 0)::BIGINT FROM cart WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&state.pool)
            .await?;
    assert_eq!((lines, quantity), (1, 3));

    Ok(())
}

#[tokio::test]
#[serial]
async fn missing_rows_and_empty_carts() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user_id = common::create_user(&state, "Cy", "cy@example.com").await?;

    let missing_menu = cart_service::add_to_cart(
        &state,
        AddToCartRequest {
            user_id: Some(user_id),
            menu_id: Some(999),
            quantity: None,
        },
    )
    .await;
    assert!(matches!(missing_menu, Err(AppError::NotFound(m)) if m == "Menu item not found"));

    let removed = cart_service::remove_line(&state, 999).await;
    assert!(matches!(removed, Err(AppError::NotFound(m)) if m == "Cart item not found"));

    let cleared = cart_service::clear_cart(&state, user_id).await?;
    assert!(cleared.success);
    assert_eq!(cleared.data.expect("clear result").removed, 0);

    let bad_query = cart_service::list_cart(
        &state,
        CartQuery {
            user_id: Some("abc".into()),
        },
    )
    .await;
    assert!(matches!(bad_query, Err(AppError::Validation(m)) if m == "Invalid User ID format"));

    Ok(())
}

#[tokio::test]
#[serial]
async fn quantity_that_would_overflow_is_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user_id = common::create_user(&state, "Cy", "cy@example.com").await?;
    let menu_id = common::create_menu(&state, "Dumplings", Decimal::new(800, 2)).await?;
    let add = |quantity| AddToCartRequest {
        user_id: Some(user_id),
        menu_id: Some(menu_id),
        quantity: Some(quantity),
    };

    cart_service::add_to_cart(&state, add(i32::MAX - 1)).await?;
    let overflow = cart_service::add_to_cart(&state, add(5)).await;
    assert!(matches!(overflow, Err(AppError::Validation(m)) if m == "Quantity is too large"));

    let (quantity,): (i32,) =
        sqlx::query_as("SELECT quantity FROM cart WHERE user_id = $1 AND menu_id = $2")
            .bind(user_id)
            .bind(menu_id)
            .fetch_one(&state.pool)
            .await?;
    assert_eq!(quantity, i32::MAX - 1);

    Ok(())
}
