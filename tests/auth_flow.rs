mod common;

use movie_reviews_api::{
    dto::auth::LoginRequest,
    error::AppError,
    models::RoleName,
    services::auth_service::{login_user, register_user, verify_token},
};

use common::{register, register_request, setup_state};

#[tokio::test]
async fn register_then_login_issues_token_for_user() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let mut request = register_request("Alice");
    request.email = "Alice@Example.com".into();
    let user = register_user(&state, request)
        .await?
        .data
        .expect("registered user");
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Some(RoleName::Regular));

    let token = login_user(
        &state,
        LoginRequest {
            username: "ALICE".into(),
            password: "password123".into(),
        },
    )
    .await?
    .data
    .expect("token");
    assert_eq!(token.token_type, "bearer");

    let claims = verify_token(&state.jwt, &token.access_token)?;
    assert_eq!(claims.sub, user.id.to_string());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "bob").await?;

    let same_name = register_user(&state, register_request("bob")).await;
    assert!(matches!(same_name, Err(AppError::Conflict(_))));

    let mut same_email = register_request("robert");
    same_email.email = "BOB@example.com".into();
    let result = register_user(&state, same_email).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn invalid_registration_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let mut short_password = register_request("carol");
    short_password.password = "short".into();
    let result = register_user(&state, short_password).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let mut bad_email = register_request("dave");
    bad_email.email = "not-an-email".into();
    let result = register_user(&state, bad_email).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn wrong_password_or_unknown_user_fails_login() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "erin").await?;

    let wrong_password = login_user(
        &state,
        LoginRequest {
            username: "erin".into(),
            password: "password999".into(),
        },
    )
    .await;
    assert!(matches!(wrong_password, Err(AppError::BadRequest(_))));

    let unknown = login_user(
        &state,
        LoginRequest {
            username: "nobody".into(),
            password: "password123".into(),
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));
    Ok(())
}
