mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use movie_reviews_api::{
    models::RoleName,
    routes::create_app,
    services::auth_service::issue_token,
    state::AppState,
};

use common::{register, set_role, setup_state};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn token_for(state: &AppState, user_id: i32) -> String {
    issue_token(&state.jwt, user_id, chrono::Duration::minutes(5)).expect("token")
}

#[tokio::test]
async fn root_health_and_unknown_routes() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = create_app(state);

    let (status, body) = send(&app, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Movies API is running!");

    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = send(&app, get("/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nowhere");
    Ok(())
}

#[tokio::test]
async fn register_and_form_login_over_http() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let app = create_app(state.clone());

    let payload = json!({
        "username": "alice",
        "password": "password123",
        "email": "alice@example.com",
        "name": "Alice",
        "surname": "Liddell"
    });
    let (status, body) = send(&app, json_request("POST", "/users/register", None, payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("hashed_password").is_none());

    let (status, _) = send(&app, json_request("POST", "/users/register", None, payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let login = Request::builder()
        .method("POST")
        .uri("/users/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=alice&password=password123"))
        .expect("request");
    let (status, body) = send(&app, login).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "bearer");
    let token = body["data"]["access_token"].as_str().expect("token").to_string();

    let (status, body) = send(&app, get("/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "regular");
    Ok(())
}

#[tokio::test]
async fn missing_or_bad_tokens_are_unauthorized() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user_id = register(&state, "alice").await?;
    let expired = issue_token(&state.jwt, user_id, chrono::Duration::minutes(-10))?;
    let app = create_app(state);

    let response = app.clone().oneshot(get("/users/me", None)).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).map(|v| v.as_bytes()),
        Some(&b"Bearer"[..])
    );

    let (status, _) = send(&app, get("/users/me", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get("/users/me", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn movie_admin_routes_are_role_gated() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let regular_id = register(&state, "regular").await?;
    let admin_id = register(&state, "admin").await?;
    set_role(&state, admin_id, RoleName::Admin).await?;
    let regular = token_for(&state, regular_id);
    let admin = token_for(&state, admin_id);
    let app = create_app(state);

    let movie = json!({
        "title": "The Matrix",
        "director": "The Wachowskis",
        "description": "Red pill or blue pill"
    });

    let (status, _) = send(&app, json_request("POST", "/movies", Some(&regular), movie.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, json_request("POST", "/movies", Some(&admin), movie)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["slug"], "the-matrix");
    assert_eq!(body["data"]["rating"], 0.0);

    let review = json!({ "movie_id": 1, "rating": 9, "review_text": "Whoa" });
    let (status, _) = send(&app, json_request("POST", "/reviews", Some(&regular), review)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/movies/slug/the-matrix", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 9.0);

    let (status, body) = send(&app, get("/movies", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, _) = send(&app, get("/movies/42", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn favorites_over_http() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin_id = register(&state, "admin").await?;
    set_role(&state, admin_id, RoleName::Admin).await?;
    let admin = token_for(&state, admin_id);
    let app = create_app(state);

    let movie = json!({ "title": "Heat", "director": "Michael Mann", "description": "Crime" });
    let (status, _) = send(&app, json_request("POST", "/movies", Some(&admin), movie)).await;
    assert_eq!(status, StatusCode::CREATED);

    let favorite = json!({ "movie_id": 1 });
    let (status, _) = send(&app, json_request("POST", "/favorites", Some(&admin), favorite.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, json_request("POST", "/favorites", Some(&admin), favorite)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, get("/favorites/check/1", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_favorite"], true);

    let remove = Request::builder()
        .method("DELETE")
        .uri("/favorites/1")
        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
        .body(Body::empty())?;
    let (status, _) = send(&app, remove).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/favorites", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorites"], json!([]));

    let (status, _) = send(&app, json_request("POST", "/favorites", Some(&admin), json!({ "movie_id": 1 }))).await;
    assert_eq!(status, StatusCode::CREATED);

    // `/clear` must win over the `/{movie_id}` capture.
    let clear = Request::builder()
        .method("DELETE")
        .uri("/favorites/clear")
        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
        .body(Body::empty())?;
    let (status, body) = send(&app, clear).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], 1);

    let (status, body) = send(&app, get("/favorites", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorites"], json!([]));
    assert_eq!(body["meta"]["total"], 0);
    Ok(())
}
