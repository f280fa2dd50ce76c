use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::{
    config::JwtConfig,
    dto::auth::{Claims, LoginRequest, RegisterRequest, TokenResponse},
    entity::{Roles, Users, roles, users},
    error::{AppError, AppResult},
    models::{RoleName, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;
const USERNAME_LEN: std::ops::RangeInclusive<usize> = 2..=16;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

/// A stored hash that does not parse never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub fn issue_token(jwt: &JwtConfig, subject: i32, ttl: Duration) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: subject.to_string(),
        exp: expiration.timestamp().max(0) as usize,
    };

    encode(
        &Header::new(jwt.algorithm),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_token(jwt: &JwtConfig, token: &str) -> AppResult<Claims> {
    let validation = Validation::new(jwt.algorithm);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("Token has expired".into()),
        _ => AppError::invalid_credentials(),
    })
}

pub fn validate_username(username: &str) -> AppResult<()> {
    let len = username.trim().chars().count();
    if !USERNAME_LEN.contains(&len) {
        return Err(AppError::Validation(
            "username must be between 2 and 16 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::Validation("email is not valid".into())),
    }
}

pub fn validate_registration(payload: &RegisterRequest) -> AppResult<()> {
    validate_username(&payload.username)?;
    validate_password(&payload.password)?;
    validate_email(&payload.email)?;
    if payload.name.trim().is_empty() || payload.surname.trim().is_empty() {
        return Err(AppError::Validation("name and surname are required".into()));
    }
    Ok(())
}

pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<users::Model>> {
    Ok(Users::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await?)
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> AppResult<Option<users::Model>> {
    Ok(Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_role<C: ConnectionTrait>(db: &C, role: RoleName) -> AppResult<roles::Model> {
    Roles::find()
        .filter(roles::Column::Name.eq(role.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("role {role} has not been seeded")))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    validate_registration(&payload)?;
    let username = payload.username.trim().to_lowercase();
    let email = payload.email.trim().to_lowercase();

    let txn = state.orm.begin().await?;
    if find_by_username(&txn, &username).await?.is_some() {
        return Err(AppError::Conflict("Username already registered".into()));
    }
    if find_by_email(&txn, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let regular = find_role(&txn, RoleName::Regular).await?;
    let hashed_password = hash_password(&payload.password)?;

    let user = users::ActiveModel {
        name: Set(payload.name),
        surname: Set(payload.surname),
        address: Set(payload.address),
        email: Set(email),
        username: Set(username),
        hashed_password: Set(hashed_password),
        role_id: Set(Some(regular.id)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(ApiResponse::success(
        "User created",
        User::from_entity(user, Some(RoleName::Regular)),
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<TokenResponse>> {
    let LoginRequest { username, password } = payload;
    let user = find_by_username(&state.orm, &username.trim().to_lowercase()).await?;

    let user = match user {
        Some(u) if verify_password(&password, &u.hashed_password) => u,
        _ => {
            return Err(AppError::BadRequest(
                "Incorrect username or password".into(),
            ));
        }
    };

    let ttl = Duration::minutes(state.jwt.access_token_ttl_minutes);
    let access_token = issue_token(&state.jwt, user.id, ttl)?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(
        "Logged in",
        TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        },
        Some(Meta::empty()),
    ))
}
