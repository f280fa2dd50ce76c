mod common;

use movie_reviews_api::{
    dto::users::UpdateUserRequest,
    error::AppError,
    models::RoleName,
    services::{auth_service::find_role, user_service},
};

use common::{auth_user, register, setup_state, user_with_role};

#[tokio::test]
async fn superadmin_promotes_and_demotes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let root = user_with_role(&state, "root", RoleName::Superadmin).await?;
    let alice_id = register(&state, "alice").await?;

    let promoted = user_service::promote_user(&state, &root, alice_id)
        .await?
        .data
        .expect("user");
    assert_eq!(promoted.role, Some(RoleName::Admin));
    assert_eq!(auth_user(&state, alice_id).await?.role, Some(RoleName::Admin));

    let demoted = user_service::demote_user(&state, &root, alice_id)
        .await?
        .data
        .expect("user");
    assert_eq!(demoted.role, Some(RoleName::Regular));
    Ok(())
}

#[tokio::test]
async fn admins_and_regulars_cannot_manage_users() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let regular = user_with_role(&state, "regular", RoleName::Regular).await?;

    for caller in [&admin, &regular] {
        let promote = user_service::promote_user(&state, caller, regular.user_id).await;
        assert!(matches!(promote, Err(AppError::Forbidden)));
        let list = user_service::list_users(&state, caller).await;
        assert!(matches!(list, Err(AppError::Forbidden)));
        let delete = user_service::delete_user(&state, caller, admin.user_id).await;
        assert!(matches!(delete, Err(AppError::Forbidden)));
    }
    Ok(())
}

#[tokio::test]
async fn users_see_and_edit_only_themselves() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let bob = user_with_role(&state, "bob", RoleName::Regular).await?;

    let me = user_service::current_user(&state, &alice).await?.data.expect("user");
    assert_eq!(me.username, "alice");

    let other = user_service::get_user(&state, &alice, bob.user_id).await;
    assert!(matches!(other, Err(AppError::Forbidden)));

    let updated = user_service::update_user(
        &state,
        &alice,
        alice.user_id,
        UpdateUserRequest {
            address: Some("221B Baker Street".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(updated.address.as_deref(), Some("221B Baker Street"));

    let taken = user_service::update_user(
        &state,
        &alice,
        alice.user_id,
        UpdateUserRequest {
            username: Some("bob".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    let admin_role = find_role(&state.orm, RoleName::Admin).await?;
    let escalate = user_service::update_user(
        &state,
        &alice,
        alice.user_id,
        UpdateUserRequest {
            role_id: Some(admin_role.id),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(escalate, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn superadmin_lists_and_deletes_users() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let root = user_with_role(&state, "root", RoleName::Superadmin).await?;
    let alice_id = register(&state, "alice").await?;

    let listed = user_service::list_users(&state, &root).await?;
    assert_eq!(listed.meta.as_ref().and_then(|m| m.total), Some(2));

    user_service::delete_user(&state, &root, alice_id).await?;
    let gone = user_service::get_user(&state, &root, alice_id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn profile_updates_follow_registration_rules() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;

    let invalid = [
        UpdateUserRequest {
            username: Some(String::new()),
            ..Default::default()
        },
        UpdateUserRequest {
            username: Some("a".repeat(17)),
            ..Default::default()
        },
        UpdateUserRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        },
        UpdateUserRequest {
            password: Some("short".into()),
            ..Default::default()
        },
    ];
    for payload in invalid {
        let result = user_service::update_user(&state, &alice, alice.user_id, payload).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    let updated = user_service::update_user(
        &state,
        &alice,
        alice.user_id,
        UpdateUserRequest {
            name: Some(String::new()),
            surname: Some("   ".into()),
            email: Some("Alice@Wonderland.org".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.name, "Test");
    assert_eq!(updated.surname, "User");
    assert_eq!(updated.email, "alice@wonderland.org");
    Ok(())
}
