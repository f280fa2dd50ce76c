use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::genres::{CreateGenreRequest, GenreList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Genre,
    response::ApiResponse,
    services::genre_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route("/{id}", delete(delete_genre))
}

#[utoipa::path(
    get,
    path = "/genres",
    responses(
        (status = 200, description = "List genres", body = ApiResponse<GenreList>)
    ),
    tag = "Genres"
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<ApiResponse<GenreList>>> {
    let resp = genre_service::list_genres(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Create genre", body = ApiResponse<Genre>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Genre already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGenreRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Genre>>)> {
    let resp = genre_service::create_genre(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Genre not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = genre_service::delete_genre(&state, &user, id).await?;
    Ok(Json(resp))
}
