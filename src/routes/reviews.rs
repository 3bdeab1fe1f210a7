use axum::{Router, extract::State, http::StatusCode, routing::{get, put}};

use crate::{
    dto::reviews::{CreateReviewRequest, DeleteReviewRequest, ReviewList, UpdateReviewRequest},
    error::AppResult,
    extract::{Json, Path},
    models::Review,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/menu/{menu_id}", get(list_menu_reviews))
        .route("/{id}", put(update_review).delete(delete_review))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Every review, newest first", body = ApiResponse<ReviewList>)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_all(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/reviews/menu/{menu_id}",
    params(
        ("menu_id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Reviews for one menu, newest first", body = ApiResponse<ReviewList>)
    ),
    tag = "Reviews"
)]
pub async fn list_menu_reviews(
    State(state): State<AppState>,
    Path(menu_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_by_menu(&state, menu_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<Review>),
        (status = 400, description = "Missing fields or rating out of range"),
        (status = 404, description = "Menu or user not found"),
        (status = 409, description = "Already reviewed"),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let resp = review_service::create_review(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 404, description = "Review not found or unauthorized"),
    ),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::update_review(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    request_body = DeleteReviewRequest,
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<Review>),
        (status = 404, description = "Review not found or unauthorized"),
    ),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DeleteReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::delete_review(&state, id, payload).await?;
    Ok(Json(resp))
}
