use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::movies::{CreateMovieRequest, MovieList, MovieQuery, UpdateMovieRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::MovieResponse,
    response::ApiResponse,
    services::movie_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/slug/{slug}", get(get_movie_by_slug))
        .route(
            "/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route(
            "/{id}/genres/{genre_id}",
            post(link_genre).delete(unlink_genre),
        )
}

#[utoipa::path(
    get,
    path = "/movies",
    params(
        ("genre" = Option<String>, Query, description = "Exact genre name to filter by"),
        ("sort" = Option<String>, Query, description = "Rating order: asc or desc (default desc)")
    ),
    responses(
        (status = 200, description = "List movies with rating, genres and slug", body = ApiResponse<MovieList>)
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    let resp = movie_service::list_movies(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Get movie", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let resp = movie_service::get_movie(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/movies/slug/{slug}",
    params(("slug" = String, Path, description = "Slug derived from the title")),
    responses(
        (status = 200, description = "Get movie by slug", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn get_movie_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let resp = movie_service::get_movie_by_slug(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Create movie", body = ApiResponse<MovieResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Genre not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MovieResponse>>)> {
    let resp = movie_service::create_movie(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Updated movie", body = ApiResponse<MovieResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMovieRequest>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let resp = movie_service::update_movie(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Deleted movie", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = movie_service::delete_movie(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/movies/{id}/genres/{genre_id}",
    params(
        ("id" = i32, Path, description = "Movie ID"),
        ("genre_id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre linked", body = ApiResponse<MovieResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie or genre not found"),
        (status = 409, description = "Already linked")
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn link_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, genre_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let resp = movie_service::link_genre(&state, &user, id, genre_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}/genres/{genre_id}",
    params(
        ("id" = i32, Path, description = "Movie ID"),
        ("genre_id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre unlinked", body = ApiResponse<MovieResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Movie or link not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn unlink_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, genre_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let resp = movie_service::unlink_genre(&state, &user, id, genre_id).await?;
    Ok(Json(resp))
}
