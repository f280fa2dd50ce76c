use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::{
    dto::auth::Claims,
    entity::{Roles, Users},
    error::AppError,
    models::RoleName,
    services::auth_service::verify_token,
    state::AppState,
};

/// The caller, resolved from the bearer token and re-read from the store.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: Option<RoleName>,
}

pub fn role_name(user: &AuthUser) -> Option<RoleName> {
    user.role
}

pub fn is_admin_or_superadmin(user: &AuthUser) -> bool {
    matches!(
        role_name(user),
        Some(RoleName::Admin | RoleName::Superadmin)
    )
}

pub fn is_superadmin(user: &AuthUser) -> bool {
    role_name(user) == Some(RoleName::Superadmin)
}

pub fn ensure_admin_or_superadmin(user: &AuthUser) -> Result<(), AppError> {
    if !is_admin_or_superadmin(user) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_superadmin(user: &AuthUser) -> Result<(), AppError> {
    if !is_superadmin(user) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_owner(user: &AuthUser, owner_id: i32) -> Result<(), AppError> {
    if user.user_id != owner_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_owner_or_admin(user: &AuthUser, owner_id: i32) -> Result<(), AppError> {
    if user.user_id == owner_id || is_admin_or_superadmin(user) {
        return Ok(());
    }
    Err(AppError::Forbidden)
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;
    Ok(token)
}

/// Second half of the pipeline: claims -> user row -> role name.
pub async fn load_current_user<C: ConnectionTrait>(
    db: &C,
    claims: &Claims,
) -> Result<AuthUser, AppError> {
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_credentials())?;

    let user = Users::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let role = match user.role_id {
        Some(role_id) => Roles::find_by_id(role_id)
            .one(db)
            .await?
            .and_then(|r| r.name.parse::<RoleName>().ok()),
        None => None,
    };

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = verify_token(&state.jwt, token)?;
        load_current_user(&state.orm, &claims).await
    }
}
