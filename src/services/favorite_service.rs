use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteStatus},
    entity::{Favorites, Movies, favorites, movies},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Favorite, MovieInFavorite, UserFavorites},
    response::{ApiResponse, Meta},
    services::movie_service::find_movie,
    state::AppState,
};

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<UserFavorites>> {
    let movie_ids: Vec<i32> = Favorites::find()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .order_by_asc(favorites::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|f| f.movie_id)
        .collect();

    let movies = if movie_ids.is_empty() {
        Vec::new()
    } else {
        Movies::find()
            .filter(movies::Column::Id.is_in(movie_ids))
            .order_by_asc(movies::Column::Id)
            .all(&state.orm)
            .await?
    };

    let favorites: Vec<MovieInFavorite> = movies.into_iter().map(movie_in_favorite).collect();
    let total = favorites.len();
    let data = UserFavorites {
        user_id: user.user_id,
        favorites,
    };
    Ok(ApiResponse::list("OK", data, total))
}

pub async fn check_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
) -> AppResult<ApiResponse<FavoriteStatus>> {
    let existing = find_favorite(&state.orm, user.user_id, movie_id).await?;
    let data = FavoriteStatus {
        is_favorite: existing.is_some(),
    };
    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: AddFavoriteRequest,
) -> AppResult<ApiResponse<Favorite>> {
    let txn = state.orm.begin().await?;
    let movie = find_movie(&txn, payload.movie_id).await?;

    // Check-then-insert; the unique (user_id, movie_id) index backs this up.
    if find_favorite(&txn, user.user_id, payload.movie_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Movie already in favorites".into()));
    }

    let favorite = favorites::ActiveModel {
        user_id: Set(user.user_id),
        movie_id: Set(payload.movie_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        movie_id = payload.movie_id,
        "favorite added"
    );
    let data = Favorite {
        id: favorite.id,
        user_id: favorite.user_id,
        movie_id: favorite.movie_id,
        movie: Some(movie_in_favorite(movie)),
    };
    Ok(ApiResponse::success(
        "Added to favorites",
        data,
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Favorites::delete_many()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .filter(favorites::Column::MovieId.eq(movie_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Favorite"));
    }

    tracing::info!(user_id = user.user_id, movie_id, "favorite removed");
    Ok(ApiResponse::success(
        "Removed from favorites",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn clear_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Favorites::delete_many()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    tracing::info!(
        user_id = user.user_id,
        removed = result.rows_affected,
        "favorites cleared"
    );
    Ok(ApiResponse::success(
        "Favorites cleared",
        serde_json::json!({ "removed": result.rows_affected }),
        Some(Meta::empty()),
    ))
}

async fn find_favorite<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    movie_id: i32,
) -> AppResult<Option<favorites::Model>> {
    Ok(Favorites::find()
        .filter(favorites::Column::UserId.eq(user_id))
        .filter(favorites::Column::MovieId.eq(movie_id))
        .one(db)
        .await?)
}

fn movie_in_favorite(movie: movies::Model) -> MovieInFavorite {
    MovieInFavorite {
        id: movie.id,
        title: movie.title,
        image: movie.image,
    }
}
