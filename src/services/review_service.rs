use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, TryIntoModel,
};

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, ReviewQuery, UpdateReviewRequest},
    entity::{Movies, Reviews, Users, reviews},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner, ensure_owner_or_admin},
    models::{MovieInReview, Review, UserInReview},
    response::{ApiResponse, Meta},
    services::movie_service::find_movie,
    state::AppState,
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

pub async fn list_reviews(
    state: &AppState,
    query: ReviewQuery,
) -> AppResult<ApiResponse<ReviewList>> {
    let mut finder = Reviews::find();
    if let Some(movie_id) = query.movie_id {
        finder = finder.filter(reviews::Column::MovieId.eq(movie_id));
    }
    let models = finder
        .order_by_asc(reviews::Column::Id)
        .all(&state.orm)
        .await?;
    review_list(&state.orm, models).await
}

pub async fn list_reviews_for_movie(
    state: &AppState,
    movie_id: i32,
) -> AppResult<ApiResponse<ReviewList>> {
    find_movie(&state.orm, movie_id).await?;
    let models = Reviews::find()
        .filter(reviews::Column::MovieId.eq(movie_id))
        .order_by_asc(reviews::Column::Id)
        .all(&state.orm)
        .await?;
    review_list(&state.orm, models).await
}

pub async fn list_my_reviews(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ReviewList>> {
    let models = Reviews::find()
        .filter(reviews::Column::UserId.eq(user.user_id))
        .order_by_desc(reviews::Column::ReviewDate)
        .all(&state.orm)
        .await?;
    review_list(&state.orm, models).await
}

pub async fn get_review(state: &AppState, id: i32) -> AppResult<ApiResponse<Review>> {
    let model = find_review(&state.orm, id).await?;
    let data = review_from_entity(&state.orm, model).await?;
    Ok(ApiResponse::success("Review", data, None))
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    validate_rating(payload.rating)?;

    let txn = state.orm.begin().await?;
    find_movie(&txn, payload.movie_id).await?;

    let review = reviews::ActiveModel {
        rating: Set(payload.rating),
        review_text: Set(payload.review_text),
        review_date: Set(Utc::now().into()),
        user_id: Set(user.user_id),
        movie_id: Set(payload.movie_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let data = review_from_entity(&txn, review).await?;
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        movie_id = payload.movie_id,
        review_id = data.id,
        "review created"
    );
    Ok(ApiResponse::success("Review created", data, Some(Meta::empty())))
}

/// Owner only. The review's author and movie never change.
pub async fn update_review(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    let txn = state.orm.begin().await?;
    let existing = find_review(&txn, id).await?;
    ensure_owner(user, existing.user_id)?;

    let mut active: reviews::ActiveModel = existing.into();
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
        active.rating = Set(rating);
    }
    if let Some(review_text) = payload.review_text {
        active.review_text = Set(review_text);
    }
    let review = if active.is_changed() {
        active.update(&txn).await?
    } else {
        active.try_into_model()?
    };

    let data = review_from_entity(&txn, review).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, review_id = id, "review updated");
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;
    let existing = find_review(&txn, id).await?;
    ensure_owner_or_admin(user, existing.user_id)?;

    Reviews::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, review_id = id, "review deleted");
    Ok(ApiResponse::success(
        "Review deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_review<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<reviews::Model> {
    Reviews::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Review"))
}

async fn review_list<C: ConnectionTrait>(
    db: &C,
    models: Vec<reviews::Model>,
) -> AppResult<ApiResponse<ReviewList>> {
    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(review_from_entity(db, model).await?);
    }
    let total = items.len();
    Ok(ApiResponse::list("Reviews", ReviewList { items }, total))
}

async fn review_from_entity<C: ConnectionTrait>(
    db: &C,
    model: reviews::Model,
) -> AppResult<Review> {
    let user = Users::find_by_id(model.user_id)
        .one(db)
        .await?
        .map(|u| UserInReview {
            id: u.id,
            username: u.username,
        });
    let movie = Movies::find_by_id(model.movie_id)
        .one(db)
        .await?
        .map(|m| MovieInReview {
            id: m.id,
            title: m.title,
        });

    Ok(Review {
        id: model.id,
        rating: model.rating,
        review_text: model.review_text,
        review_date: model.review_date.with_timezone(&Utc),
        user,
        movie,
    })
}
