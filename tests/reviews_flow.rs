mod common;

use food_order_api::{
    dto::reviews::{CreateReviewRequest, DeleteReviewRequest, UpdateReviewRequest},
    error::AppError,
    services::review_service,
};
use rust_decimal::Decimal;
use serial_test::serial;

fn review(menu_id: i32, email: &str, rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        menu_id: Some(menu_id),
        user_email: Some(email.into()),
        rating: Some(rating),
        comment: Some("Would order again".into()),
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
async fn one_review_per_user_and_menu() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    common::create_user(&state, "Hana", "hana@example.com").await?;
    let menu_id = common::create_menu(&state, "Bibimbap", Decimal::new(1200, 2)).await?;

    let created = review_service::create_review(&state, review(menu_id, "hana@example.com", 5))
        .await?
        .data
        .expect("review");
    assert_eq!(created.user_name, "Hana");
    assert_eq!(created.rating, 5);

    let again = review_service::create_review(&state, review(menu_id, "Hana@Example.com", 4)).await;
    assert!(matches!(again, Err(AppError::Conflict(m)) if m == "You have already reviewed this menu"));

    let listed = review_service::list_by_menu(&state, menu_id).await?;
    assert_eq!(listed.meta.and_then(|m| m.total), Some(1));

    Ok(())
}

#[tokio::test]
#[serial]
async fn only_the_author_can_edit_or_delete() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    common::create_user(&state, "Ivy", "ivy@example.com").await?;
    let menu_id = common::create_menu(&state, "Pho", Decimal::new(1150, 2)).await?;
    let created = review_service::create_review(&state, review(menu_id, "ivy@example.com", 3))
        .await?
        .data
        .expect("review");

    let stranger = review_service::update_review(
        &state,
        created.id,
        UpdateReviewRequest {
            user_email: Some("mallory@example.com".into()),
            rating: Some(1),
            comment: Some("bad".into()),
        },
    )
    .await;
    assert!(matches!(stranger, Err(AppError::NotFound(m)) if m == "Review not found or unauthorized"));

    let updated = review_service::update_review(
        &state,
        created.id,
        UpdateReviewRequest {
            user_email: Some("ivy@example.com".into()),
            rating: Some(4),
            comment: Some("Better the second time".into()),
        },
    )
    .await?
    .data
    .expect("review");
    assert_eq!(updated.rating, 4);
    assert!(updated.updated_at >= created.updated_at);

    let stranger = review_service::delete_review(
        &state,
        created.id,
        DeleteReviewRequest {
            user_email: Some("mallory@example.com".into()),
        },
    )
    .await;
    assert!(matches!(stranger, Err(AppError::NotFound(_))));

    review_service::delete_review(
        &state,
        created.id,
        DeleteReviewRequest {
            user_email: Some("ivy@example.com".into()),
        },
    )
    .await?;
    assert_eq!(common::count(&state, "reviews").await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn invalid_reviews_are_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let menu_id = common::create_menu(&state, "Katsu", Decimal::new(1400, 2)).await?;

    let out_of_range = review_service::create_review(&state, review(menu_id, "jo@example.com", 6)).await;
    assert!(matches!(out_of_range, Err(AppError::Validation(_))));

    let missing_menu = review_service::create_review(&state, review(4242, "jo@example.com", 4)).await;
    assert!(matches!(missing_menu, Err(AppError::NotFound(m)) if m == "Menu not found"));

    // no users row and no display name supplied
    let unknown = review_service::create_review(&state, review(menu_id, "jo@example.com", 4)).await;
    assert!(matches!(unknown, Err(AppError::NotFound(m)) if m == "User not found"));

    let mut guest = review(menu_id, "jo@example.com", 4);
    guest.user_name = Some("Jo".into());
    let created = review_service::create_review(&state, guest).await?.data.expect("review");
    assert_eq!(created.user_name, "Jo");
    assert_eq!(created.user_image, "https://via.placeholder.com/150");

    Ok(())
}
