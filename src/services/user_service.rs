use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, TryIntoModel,
};

use crate::{
    dto::users::{UpdateUserRequest, UserList},
    entity::{Favorites, Reviews, Roles, Users, favorites, reviews, users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_superadmin, is_superadmin},
    models::{RoleName, User},
    response::{ApiResponse, Meta},
    services::auth_service::{
        find_by_email, find_by_username, find_role, hash_password, validate_email,
        validate_password, validate_username,
    },
    state::AppState,
};

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_superadmin(user)?;

    let roles: HashMap<i32, RoleName> = Roles::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|r| r.name.parse().ok().map(|name| (r.id, name)))
        .collect();

    let items: Vec<User> = Users::find()
        .order_by_asc(users::Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|u| {
            let role = u.role_id.and_then(|id| roles.get(&id).copied());
            User::from_entity(u, role)
        })
        .collect();

    let total = items.len();
    Ok(ApiResponse::list("Users", UserList { items }, total))
}

pub async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = find_user(&state.orm, user.user_id).await?;
    let data = with_role(&state.orm, model).await?;
    Ok(ApiResponse::success("Current user", data, None))
}

/// Self or superadmin.
pub async fn get_user(state: &AppState, user: &AuthUser, id: i32) -> AppResult<ApiResponse<User>> {
    ensure_self_or_superadmin(user, id)?;
    let model = find_user(&state.orm, id).await?;
    let data = with_role(&state.orm, model).await?;
    Ok(ApiResponse::success("User", data, None))
}

/// Self or superadmin; only a superadmin may change `role_id`.
pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_self_or_superadmin(user, id)?;
    if payload.role_id.is_some() && !is_superadmin(user) {
        return Err(AppError::Forbidden);
    }

    let txn = state.orm.begin().await?;
    let existing = find_user(&txn, id).await?;
    let current_username = existing.username.clone();
    let current_email = existing.email.clone();
    let mut active: users::ActiveModel = existing.into();

    if let Some(username) = payload.username {
        validate_username(&username)?;
        let username = username.trim().to_lowercase();
        if username != current_username {
            if find_by_username(&txn, &username).await?.is_some() {
                return Err(AppError::Conflict("Username already registered".into()));
            }
            active.username = Set(username);
        }
    }
    if let Some(email) = payload.email {
        validate_email(&email)?;
        let email = email.trim().to_lowercase();
        if email != current_email {
            if find_by_email(&txn, &email).await?.is_some() {
                return Err(AppError::Conflict("Email already registered".into()));
            }
            active.email = Set(email);
        }
    }
    // Blank profile fields leave the stored value alone.
    if let Some(name) = non_blank(payload.name) {
        active.name = Set(name);
    }
    if let Some(surname) = non_blank(payload.surname) {
        active.surname = Set(surname);
    }
    if let Some(address) = non_blank(payload.address) {
        active.address = Set(Some(address));
    }
    if let Some(password) = payload.password {
        validate_password(&password)?;
        active.hashed_password = Set(hash_password(&password)?);
    }
    if let Some(role_id) = payload.role_id {
        if Roles::find_by_id(role_id).one(&txn).await?.is_none() {
            return Err(AppError::not_found("Role"));
        }
        active.role_id = Set(Some(role_id));
    }

    let updated = if active.is_changed() {
        active.update(&txn).await?
    } else {
        active.try_into_model()?
    };
    let data = with_role(&txn, updated).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, target_id = id, "user updated");
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

/// Superadmin only. Removes the user's reviews and favorites with it.
pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_superadmin(user)?;

    let txn = state.orm.begin().await?;
    find_user(&txn, id).await?;
    Reviews::delete_many()
        .filter(reviews::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    Favorites::delete_many()
        .filter(favorites::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    Users::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, target_id = id, "user deleted");
    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn promote_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<User>> {
    set_role(state, user, id, RoleName::Admin).await
}

pub async fn demote_user(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<User>> {
    set_role(state, user, id, RoleName::Regular).await
}

async fn set_role(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    role: RoleName,
) -> AppResult<ApiResponse<User>> {
    ensure_superadmin(user)?;

    let txn = state.orm.begin().await?;
    let target = find_user(&txn, id).await?;
    let role_row = find_role(&txn, role).await?;

    let mut active: users::ActiveModel = target.into();
    active.role_id = Set(Some(role_row.id));
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, target_id = id, role = %role, "role changed");
    Ok(ApiResponse::success(
        "Role updated",
        User::from_entity(updated, Some(role)),
        Some(Meta::empty()),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn ensure_self_or_superadmin(user: &AuthUser, id: i32) -> AppResult<()> {
    if user.user_id == id || is_superadmin(user) {
        return Ok(());
    }
    Err(AppError::Forbidden)
}

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<users::Model> {
    Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

async fn with_role<C: ConnectionTrait>(db: &C, model: users::Model) -> AppResult<User> {
    let role = match model.role_id {
        Some(role_id) => Roles::find_by_id(role_id)
            .one(db)
            .await?
            .and_then(|r| r.name.parse().ok()),
        None => None,
    };
    Ok(User::from_entity(model, role))
}
