use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, TryIntoModel,
};

use crate::{
    dto::movies::{CreateMovieRequest, MovieList, MovieQuery, UpdateMovieRequest},
    entity::{
        Favorites, Genres, MovieGenreLinks, Movies, Reviews, favorites, movie_genre_link, movies,
        reviews,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin_or_superadmin},
    models::MovieResponse,
    response::{ApiResponse, Meta},
    services::catalog_service::{
        build_movie_response, filter_by_genre, movie_slug, next_available_id, sort_by_rating,
    },
    state::AppState,
};

pub async fn list_movies(
    state: &AppState,
    query: MovieQuery,
) -> AppResult<ApiResponse<MovieList>> {
    let models = Movies::find()
        .order_by_asc(movies::Column::Id)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(build_movie_response(&state.orm, model).await?);
    }

    if let Some(genre) = query.genre.as_deref().filter(|g| !g.is_empty()) {
        items = filter_by_genre(items, genre);
    }
    sort_by_rating(&mut items, query.sort.unwrap_or_default());

    let total = items.len();
    Ok(ApiResponse::list("Movies", MovieList { items }, total))
}

pub async fn get_movie(state: &AppState, id: i32) -> AppResult<ApiResponse<MovieResponse>> {
    let movie = find_movie(&state.orm, id).await?;
    let data = build_movie_response(&state.orm, movie).await?;
    Ok(ApiResponse::success("Movie", data, None))
}

pub async fn get_movie_by_slug(
    state: &AppState,
    slug: &str,
) -> AppResult<ApiResponse<MovieResponse>> {
    let movie = Movies::find()
        .order_by_asc(movies::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .find(|m| movie_slug(&m.title) == slug)
        .ok_or_else(|| AppError::not_found("Movie"))?;
    let data = build_movie_response(&state.orm, movie).await?;
    Ok(ApiResponse::success("Movie", data, None))
}

pub async fn create_movie(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMovieRequest,
) -> AppResult<ApiResponse<MovieResponse>> {
    ensure_admin_or_superadmin(user)?;
    require_text("title", &payload.title)?;
    require_text("director", &payload.director)?;

    let txn = state.orm.begin().await?;
    let genre_ids = dedup_ids(payload.genre_ids.unwrap_or_default());
    ensure_genres_exist(&txn, &genre_ids).await?;

    // Ids are gap-filled; see `next_available_id` for the race this implies.
    let existing_ids: Vec<i32> = Movies::find()
        .select_only()
        .column(movies::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;
    let id = next_available_id(existing_ids);

    let movie = movies::ActiveModel {
        id: Set(id),
        title: Set(payload.title),
        director: Set(payload.director),
        description: Set(payload.description),
        image: Set(payload.image),
        release_date: Set(payload.release_date),
    }
    .insert(&txn)
    .await?;

    replace_genre_links(&txn, movie.id, &genre_ids).await?;
    let data = build_movie_response(&txn, movie).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id = data.id, "movie created");
    Ok(ApiResponse::success("Movie created", data, Some(Meta::empty())))
}

pub async fn update_movie(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateMovieRequest,
) -> AppResult<ApiResponse<MovieResponse>> {
    ensure_admin_or_superadmin(user)?;

    let txn = state.orm.begin().await?;
    let existing = find_movie(&txn, id).await?;

    let mut active: movies::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        require_text("title", &title)?;
        active.title = Set(title);
    }
    if let Some(director) = payload.director {
        require_text("director", &director)?;
        active.director = Set(director);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(release_date) = payload.release_date {
        active.release_date = Set(release_date);
    }
    let movie = if active.is_changed() {
        active.update(&txn).await?
    } else {
        active.try_into_model()?
    };

    if let Some(genre_ids) = payload.genre_ids {
        let genre_ids = dedup_ids(genre_ids);
        ensure_genres_exist(&txn, &genre_ids).await?;
        replace_genre_links(&txn, movie.id, &genre_ids).await?;
    }

    let data = build_movie_response(&txn, movie).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id = id, "movie updated");
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

pub async fn delete_movie(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin_or_superadmin(user)?;

    let txn = state.orm.begin().await?;
    find_movie(&txn, id).await?;

    Reviews::delete_many()
        .filter(reviews::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Favorites::delete_many()
        .filter(favorites::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    MovieGenreLinks::delete_many()
        .filter(movie_genre_link::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Movies::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id = id, "movie deleted");
    Ok(ApiResponse::success(
        "Movie deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn link_genre(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
    genre_id: i32,
) -> AppResult<ApiResponse<MovieResponse>> {
    ensure_admin_or_superadmin(user)?;

    let txn = state.orm.begin().await?;
    let movie = find_movie(&txn, movie_id).await?;
    ensure_genres_exist(&txn, &[genre_id]).await?;

    let existing = MovieGenreLinks::find_by_id((movie_id, genre_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Genre already linked to movie".into()));
    }
    insert_link(&txn, movie_id, genre_id).await?;

    let data = build_movie_response(&txn, movie).await?;
    txn.commit().await?;
    Ok(ApiResponse::success("Genre linked", data, Some(Meta::empty())))
}

pub async fn unlink_genre(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
    genre_id: i32,
) -> AppResult<ApiResponse<MovieResponse>> {
    ensure_admin_or_superadmin(user)?;

    let txn = state.orm.begin().await?;
    let movie = find_movie(&txn, movie_id).await?;
    let result = MovieGenreLinks::delete_by_id((movie_id, genre_id))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Genre link"));
    }

    let data = build_movie_response(&txn, movie).await?;
    txn.commit().await?;
    Ok(ApiResponse::success("Genre unlinked", data, Some(Meta::empty())))
}

pub async fn find_movie<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<movies::Model> {
    Movies::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Movie"))
}

async fn ensure_genres_exist<C: ConnectionTrait>(db: &C, genre_ids: &[i32]) -> AppResult<()> {
    for &genre_id in genre_ids {
        if Genres::find_by_id(genre_id).one(db).await?.is_none() {
            return Err(AppError::NotFound(format!("Genre {genre_id} not found")));
        }
    }
    Ok(())
}

async fn replace_genre_links<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    genre_ids: &[i32],
) -> AppResult<()> {
    MovieGenreLinks::delete_many()
        .filter(movie_genre_link::Column::MovieId.eq(movie_id))
        .exec(db)
        .await?;
    for &genre_id in genre_ids {
        insert_link(db, movie_id, genre_id).await?;
    }
    Ok(())
}

async fn insert_link<C: ConnectionTrait>(db: &C, movie_id: i32, genre_id: i32) -> AppResult<()> {
    MovieGenreLinks::insert(movie_genre_link::ActiveModel {
        movie_id: Set(movie_id),
        genre_id: Set(genre_id),
    })
    .exec_without_returning(db)
    .await?;
    Ok(())
}

/// Keeps the first occurrence of each id, in request order.
fn dedup_ids(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = BTreeSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
