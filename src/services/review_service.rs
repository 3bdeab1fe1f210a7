use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::{
        reviews::{CreateReviewRequest, DeleteReviewRequest, ReviewList, UpdateReviewRequest},
        users::DEFAULT_USER_IMAGE,
    },
    entity::{
        menus::Entity as Menus,
        reviews::{Column as ReviewCol, Entity as Reviews},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::Review,
    response::{ApiResponse, Meta},
    state::AppState,
};

const NOT_FOUND_OR_UNAUTHORIZED: &str = "Review not found or unauthorized";

/// Post a review. One review per (menu, author e-mail); a second attempt is a
/// `Conflict` so clients can switch to editing instead of retrying.
pub async fn create_review(
    state: &AppState,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let review = payload.validate()?;

    if Menus::find_by_id(review.menu_id).one(&state.orm).await?.is_none() {
        return Err(AppError::not_found("Menu not found"));
    }

    let author = Users::find()
        .filter(UserCol::Email.eq(review.user_email.as_str()))
        .one(&state.orm)
        .await?;

    // caller-supplied display fields win over the users table
    let user_name = match (review.user_name.clone(), author.as_ref()) {
        (Some(name), _) => name,
        (None, Some(user)) => user.name.clone(),
        (None, None) => return Err(AppError::not_found("User not found")),
    };
    let user_image = review
        .user_image
        .clone()
        .or_else(|| author.as_ref().map(|user| user.image.clone()))
        .unwrap_or_else(|| DEFAULT_USER_IMAGE.to_string());

    let inserted = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (menu_id, user_email, user_name, user_image, rating, comment)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(review.menu_id)
    .bind(&review.user_email)
    .bind(user_name)
    .bind(user_image)
    .bind(review.rating)
    .bind(&review.comment)
    .fetch_one(&state.pool)
    .await;

    let created = match inserted {
        Ok(row) => row,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::Conflict(
                "You have already reviewed this menu".into(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(review_id = created.id, menu_id = created.menu_id, "review created");
    Ok(ApiResponse::success("Review created", created, None))
}

pub async fn update_review(
    state: &AppState,
    id: i32,
    payload: UpdateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let edit = payload.validate()?;

    // the author check lives in the WHERE clause: someone else's review looks missing
    let updated = sqlx::query_as::<_, Review>(
        r#"
        UPDATE reviews
        SET rating = $3, comment = $4, updated_at = NOW()
        WHERE id = $1 AND user_email = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&edit.user_email)
    .bind(edit.rating)
    .bind(&edit.comment)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED))?;

    tracing::info!(review_id = id, "review updated");
    Ok(ApiResponse::success("Review updated", updated, None))
}

pub async fn delete_review(
    state: &AppState,
    id: i32,
    payload: DeleteReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let user_email = payload.validate()?;

    let deleted = sqlx::query_as::<_, Review>(
        "DELETE FROM reviews WHERE id = $1 AND user_email = $2 RETURNING *",
    )
    .bind(id)
    .bind(&user_email)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::not_found(NOT_FOUND_OR_UNAUTHORIZED))?;

    tracing::info!(review_id = id, "review deleted");
    Ok(ApiResponse::success("Review deleted", deleted, None))
}

pub async fn list_by_menu(state: &AppState, menu_id: i32) -> AppResult<ApiResponse<ReviewList>> {
    let items: Vec<Review> = Reviews::find()
        .filter(ReviewCol::MenuId.eq(menu_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .order_by_desc(ReviewCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", ReviewList { items }, Some(meta)))
}

pub async fn list_all(state: &AppState) -> AppResult<ApiResponse<ReviewList>> {
    let items: Vec<Review> = Reviews::find()
        .order_by_desc(ReviewCol::CreatedAt)
        .order_by_desc(ReviewCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", ReviewList { items }, Some(meta)))
}
