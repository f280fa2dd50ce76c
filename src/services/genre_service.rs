use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::genres::{CreateGenreRequest, GenreList},
    entity::{Genres, MovieGenreLinks, genres, movie_genre_link},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin_or_superadmin},
    models::Genre,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_genres(state: &AppState) -> AppResult<ApiResponse<GenreList>> {
    let items: Vec<Genre> = Genres::find()
        .order_by_asc(genres::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Genre::from)
        .collect();
    let total = items.len();
    Ok(ApiResponse::list("Genres", GenreList { items }, total))
}

pub async fn create_genre(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGenreRequest,
) -> AppResult<ApiResponse<Genre>> {
    ensure_admin_or_superadmin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }

    let txn = state.orm.begin().await?;
    let existing = Genres::find()
        .filter(genres::Column::Name.eq(name.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Genre already exists".into()));
    }

    let genre = genres::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, genre_id = genre.id, "genre created");
    Ok(ApiResponse::success(
        "Genre created",
        Genre::from(genre),
        Some(Meta::empty()),
    ))
}

pub async fn delete_genre(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_superadmin(user)?;

    let txn = state.orm.begin().await?;
    if Genres::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Genre"));
    }
    MovieGenreLinks::delete_many()
        .filter(movie_genre_link::Column::GenreId.eq(id))
        .exec(&txn)
        .await?;
    Genres::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, genre_id = id, "genre deleted");
    Ok(ApiResponse::success(
        "Genre deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
