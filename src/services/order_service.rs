use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::{
    dto::orders::{
        AdminOrderList, AdminOrderSummary, CONFIRMED_STATUS, CheckoutSessionRequest,
        CheckoutSessionResponse, CreateOrderRequest, NewOrder, OrderList, OrderSummary,
        OrderWithItems,
    },
    entity::{
        cart::{Column as CartCol, Entity as Cart},
        order_items::{ActiveModel as OrderItemActive, Model as OrderItemModel},
        orders::{ActiveModel as OrderActive, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Turn a cart into an order.
///
/// Header insert, item inserts and the cart wipe share one transaction. Any
/// failure rolls the whole unit back and surfaces as `AppError::Transaction`.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let new_order = payload.validate()?;

    let txn = state.orm.begin().await?;

    let (order, items) = match insert_order(&txn, &new_order).await {
        Ok(created) => created,
        Err(err) => {
            tracing::error!(
                error = %err,
                user_id = new_order.user_id,
                "order creation failed, rolling back"
            );
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            return Err(AppError::Transaction);
        }
    };

    if let Err(err) = txn.commit().await {
        tracing::error!(error = %err, user_id = new_order.user_id, "order commit failed");
        return Err(AppError::Transaction);
    }

    tracing::info!(
        order_id = order.id,
        user_id = order.user_id,
        items = items.len(),
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created successfully.",
        OrderWithItems {
            order: Order::from(order),
            items: items.into_iter().map(OrderItem::from).collect(),
        },
        Some(Meta::empty()),
    ))
}

async fn insert_order(
    txn: &DatabaseTransaction,
    new_order: &NewOrder,
) -> Result<(OrderModel, Vec<OrderItemModel>), DbErr> {
    let order = OrderActive {
        id: NotSet,
        user_id: Set(new_order.user_id),
        total_amount: Set(new_order.total_amount),
        status: Set(CONFIRMED_STATUS.to_string()),
        payment_method: Set(Some(new_order.payment_method.clone())),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(txn)
    .await?;

    let mut items = Vec::with_capacity(new_order.items.len());
    for line in &new_order.items {
        let item = OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            menu_id: Set(line.menu_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            created_at: NotSet,
        }
        .insert(txn)
        .await?;
        items.push(item);
    }

    Cart::delete_many()
        .filter(CartCol::UserId.eq(new_order.user_id))
        .exec(txn)
        .await?;

    Ok((order, items))
}

pub async fn list_my_orders(state: &AppState, user_id: i32) -> AppResult<ApiResponse<OrderList>> {
    if user_id <= 0 {
        return Err(AppError::validation("Invalid User ID"));
    }

    let items = sqlx::query_as::<_, OrderSummary>(
        r#"
        SELECT o.id, o.total_amount, o.status, o.payment_method, o.created_at,
               json_agg(json_build_object(
                   'menu_id', oi.menu_id,
                   'menu_name', m.name,
                   'quantity', oi.quantity,
                   'price', oi.price
               ) ORDER BY oi.id) AS items
        FROM orders o
        JOIN order_items oi ON oi.order_id = o.id
        JOIN menus m ON m.id = oi.menu_id
        WHERE o.user_id = $1
        GROUP BY o.id
        ORDER BY o.created_at DESC, o.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AdminOrderList>> {
    ensure_admin(user)?;

    let items = sqlx::query_as::<_, AdminOrderSummary>(
        r#"
        SELECT o.id, o.user_id, u.name AS user_name, u.email AS user_email,
               o.total_amount, o.status, o.payment_method, o.created_at,
               json_agg(json_build_object(
                   'menu_id', oi.menu_id,
                   'menu_name', m.name,
                   'quantity', oi.quantity,
                   'price', oi.price
               ) ORDER BY oi.id) AS items
        FROM orders o
        JOIN users u ON u.id = o.user_id
        JOIN order_items oi ON oi.order_id = o.id
        JOIN menus m ON m.id = oi.menu_id
        GROUP BY o.id, u.name, u.email
        ORDER BY o.created_at DESC, o.id DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", AdminOrderList { items }, Some(meta)))
}

/// Ask the payment provider for a hosted checkout page. Nothing is persisted.
pub async fn create_checkout_session(
    state: &AppState,
    payload: CheckoutSessionRequest,
) -> AppResult<ApiResponse<CheckoutSessionResponse>> {
    let session = payload.validate()?;

    let payments = state
        .payments
        .as_ref()
        .ok_or_else(|| AppError::Payment("Payment provider is not configured.".into()))?;

    let created = payments
        .create_checkout_session(&session)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, user_id = session.user_id, "stripe session failed");
            AppError::Payment("Failed to create payment session.".into())
        })?;

    tracing::info!(session_id = %created.id, user_id = session.user_id, "checkout session created");
    Ok(ApiResponse::success(
        "Checkout session created",
        CheckoutSessionResponse {
            id: created.id,
            url: created.url,
        },
        None,
    ))
}
