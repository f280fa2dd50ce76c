#![allow(dead_code)]

use jsonwebtoken::Algorithm;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use movie_reviews_api::{
    config::JwtConfig,
    db::{create_orm_conn, run_migrations, seed_roles},
    dto::{auth::{Claims, RegisterRequest}, genres::CreateGenreRequest, movies::CreateMovieRequest},
    entity::{Users, users},
    middleware::auth::{AuthUser, load_current_user},
    models::RoleName,
    services::{auth_service, auth_service::find_role, genre_service, movie_service},
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret-key";

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        algorithm: Algorithm::HS256,
        access_token_ttl_minutes: 30,
    }
}

/// Fresh in-memory store with migrations applied and roles seeded.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    seed_roles(&orm).await?;
    Ok(AppState::new(orm, test_jwt()))
}

pub fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: "password123".to_string(),
        email: format!("{username}@example.com"),
        name: "Test".to_string(),
        surname: "User".to_string(),
        address: None,
    }
}

/// Registers a regular user and returns its id.
pub async fn register(state: &AppState, username: &str) -> anyhow::Result<i32> {
    let resp = auth_service::register_user(state, register_request(username)).await?;
    let user = resp.data.ok_or_else(|| anyhow::anyhow!("missing user"))?;
    Ok(user.id)
}

pub async fn set_role(state: &AppState, user_id: i32, role: RoleName) -> anyhow::Result<()> {
    let role = find_role(&state.orm, role).await?;
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("user {user_id} missing"))?;
    let mut active: users::ActiveModel = user.into();
    active.role_id = Set(Some(role.id));
    active.update(&state.orm).await?;
    Ok(())
}

/// Resolves the caller the same way the extractor does, minus the token check.
pub async fn auth_user(state: &AppState, user_id: i32) -> anyhow::Result<AuthUser> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: 0,
    };
    Ok(load_current_user(&state.orm, &claims).await?)
}

pub async fn user_with_role(
    state: &AppState,
    username: &str,
    role: RoleName,
) -> anyhow::Result<AuthUser> {
    let id = register(state, username).await?;
    set_role(state, id, role).await?;
    auth_user(state, id).await
}

pub async fn create_genre(state: &AppState, admin: &AuthUser, name: &str) -> anyhow::Result<i32> {
    let resp = genre_service::create_genre(
        state,
        admin,
        CreateGenreRequest {
            name: name.to_string(),
        },
    )
    .await?;
    Ok(resp.data.ok_or_else(|| anyhow::anyhow!("missing genre"))?.id)
}

pub fn movie_request(title: &str, genre_ids: Vec<i32>) -> CreateMovieRequest {
    CreateMovieRequest {
        title: title.to_string(),
        director: "Jane Doe".to_string(),
        description: format!("About {title}"),
        image: None,
        release_date: None,
        genre_ids: Some(genre_ids),
    }
}

pub async fn create_movie(
    state: &AppState,
    admin: &AuthUser,
    title: &str,
    genre_ids: Vec<i32>,
) -> anyhow::Result<i32> {
    let resp = movie_service::create_movie(state, admin, movie_request(title, genre_ids)).await?;
    Ok(resp.data.ok_or_else(|| anyhow::anyhow!("missing movie"))?.id)
}
