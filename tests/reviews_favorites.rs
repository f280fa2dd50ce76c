mod common;

use movie_reviews_api::{
    dto::{
        favorites::AddFavoriteRequest,
        reviews::{CreateReviewRequest, ReviewQuery, UpdateReviewRequest},
    },
    error::AppError,
    models::RoleName,
    services::{favorite_service, movie_service, review_service},
};

use common::{create_movie, setup_state, user_with_role};

fn review(movie_id: i32, rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        movie_id,
        rating,
        review_text: "Worth watching".into(),
    }
}

#[tokio::test]
async fn review_author_is_the_caller() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let movie_id = create_movie(&state, &admin, "Arrival", vec![]).await?;

    let created = review_service::create_review(&state, &alice, review(movie_id, 9))
        .await?
        .data
        .expect("review");
    let author = created.user.expect("author");
    assert_eq!(author.id, alice.user_id);
    assert_eq!(author.username, "alice");
    assert_eq!(created.movie.expect("movie").title, "Arrival");
    Ok(())
}

#[tokio::test]
async fn rating_must_be_in_range_and_movie_must_exist() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let movie_id = create_movie(&state, &admin, "Arrival", vec![]).await?;

    let too_high = review_service::create_review(&state, &alice, review(movie_id, 11)).await;
    assert!(matches!(too_high, Err(AppError::Validation(_))));

    let no_movie = review_service::create_review(&state, &alice, review(999, 5)).await;
    assert!(matches!(no_movie, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn update_ignores_author_and_movie_fields() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let first = create_movie(&state, &admin, "Arrival", vec![]).await?;
    let second = create_movie(&state, &admin, "Sicario", vec![]).await?;

    let created = review_service::create_review(&state, &alice, review(first, 6))
        .await?
        .data
        .expect("review");

    let payload: UpdateReviewRequest = serde_json::from_value(serde_json::json!({
        "rating": 8,
        "movie_id": second,
        "user_id": admin.user_id,
    }))?;
    let updated = review_service::update_review(&state, &alice, created.id, payload)
        .await?
        .data
        .expect("review");

    assert_eq!(updated.rating, 8);
    assert_eq!(updated.review_text, "Worth watching");
    assert_eq!(updated.movie.expect("movie").id, first);
    assert_eq!(updated.user.expect("author").id, alice.user_id);
    Ok(())
}

#[tokio::test]
async fn only_the_author_edits_and_admins_may_delete() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let bob = user_with_role(&state, "bob", RoleName::Regular).await?;
    let movie_id = create_movie(&state, &admin, "Arrival", vec![]).await?;

    let first = review_service::create_review(&state, &alice, review(movie_id, 7))
        .await?
        .data
        .expect("review");
    let second = review_service::create_review(&state, &alice, review(movie_id, 5))
        .await?
        .data
        .expect("review");

    let edit = review_service::update_review(
        &state,
        &bob,
        first.id,
        UpdateReviewRequest {
            rating: Some(1),
            review_text: None,
        },
    )
    .await;
    assert!(matches!(edit, Err(AppError::Forbidden)));

    let delete = review_service::delete_review(&state, &bob, first.id).await;
    assert!(matches!(delete, Err(AppError::Forbidden)));

    review_service::delete_review(&state, &alice, first.id).await?;
    review_service::delete_review(&state, &admin, second.id).await?;

    let gone = review_service::get_review(&state, first.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn reviews_can_be_listed_by_movie_and_by_author() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let bob = user_with_role(&state, "bob", RoleName::Regular).await?;
    let first = create_movie(&state, &admin, "Arrival", vec![]).await?;
    let second = create_movie(&state, &admin, "Sicario", vec![]).await?;

    review_service::create_review(&state, &alice, review(first, 7)).await?;
    review_service::create_review(&state, &alice, review(second, 8)).await?;
    review_service::create_review(&state, &bob, review(first, 4)).await?;

    let all = review_service::list_reviews(&state, ReviewQuery::default()).await?;
    assert_eq!(all.data.expect("reviews").items.len(), 3);

    let filtered = review_service::list_reviews(
        &state,
        ReviewQuery {
            movie_id: Some(first),
        },
    )
    .await?;
    assert_eq!(filtered.data.expect("reviews").items.len(), 2);

    let for_movie = review_service::list_reviews_for_movie(&state, second).await?;
    assert_eq!(for_movie.data.expect("reviews").items.len(), 1);

    let mine = review_service::list_my_reviews(&state, &bob).await?;
    let mine = mine.data.expect("reviews").items;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].rating, 4);

    let missing = review_service::list_reviews_for_movie(&state, 999).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn favorites_add_check_remove_and_clear() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let first = create_movie(&state, &admin, "Arrival", vec![]).await?;
    let second = create_movie(&state, &admin, "Sicario", vec![]).await?;

    let added = favorite_service::add_favorite(&state, &alice, AddFavoriteRequest { movie_id: first })
        .await?
        .data
        .expect("favorite");
    assert_eq!(added.user_id, alice.user_id);
    assert_eq!(added.movie.expect("movie").title, "Arrival");

    let duplicate =
        favorite_service::add_favorite(&state, &alice, AddFavoriteRequest { movie_id: first }).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let missing_movie =
        favorite_service::add_favorite(&state, &alice, AddFavoriteRequest { movie_id: 999 }).await;
    assert!(matches!(missing_movie, Err(AppError::NotFound(_))));

    favorite_service::add_favorite(&state, &alice, AddFavoriteRequest { movie_id: second }).await?;

    let status = favorite_service::check_favorite(&state, &alice, first)
        .await?
        .data
        .expect("status");
    assert!(status.is_favorite);

    let listed = favorite_service::list_favorites(&state, &alice)
        .await?
        .data
        .expect("favorites");
    assert_eq!(listed.user_id, alice.user_id);
    assert_eq!(listed.favorites.len(), 2);

    favorite_service::remove_favorite(&state, &alice, first).await?;
    let again = favorite_service::remove_favorite(&state, &alice, first).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    let cleared = favorite_service::clear_favorites(&state, &alice)
        .await?
        .data
        .expect("cleared");
    assert_eq!(cleared["removed"], 1);

    let status = favorite_service::check_favorite(&state, &alice, second)
        .await?
        .data
        .expect("status");
    assert!(!status.is_favorite);
    Ok(())
}

#[tokio::test]
async fn deleting_a_movie_removes_its_reviews_and_favorites() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = user_with_role(&state, "admin", RoleName::Admin).await?;
    let alice = user_with_role(&state, "alice", RoleName::Regular).await?;
    let movie_id = create_movie(&state, &admin, "Arrival", vec![]).await?;

    review_service::create_review(&state, &alice, review(movie_id, 9)).await?;
    favorite_service::add_favorite(&state, &alice, AddFavoriteRequest { movie_id }).await?;

    movie_service::delete_movie(&state, &admin, movie_id).await?;

    let mine = review_service::list_my_reviews(&state, &alice).await?;
    assert!(mine.data.expect("reviews").items.is_empty());
    let favorites = favorite_service::list_favorites(&state, &alice)
        .await?
        .data
        .expect("favorites");
    assert!(favorites.favorites.is_empty());
    Ok(())
}
