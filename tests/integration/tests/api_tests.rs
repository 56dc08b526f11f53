//! End-to-end API tests.
//!
//! These require running PostgreSQL and Redis instances plus environment
//! variables (DATABASE_URL, REDIS_URL, JWT_SECRET); without them each test
//! skips itself.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, unique_suffix, TestServer};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: UserResponse,
    tokens: TokenResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    content: String,
    hashtags: Vec<String>,
}

async fn register(server: &TestServer, name: &str) -> AuthResponse {
    let suffix = unique_suffix();
    let response = server
        .post(
            "/auth/register",
            &json!({
                "email": format!("{name}{suffix}@example.com"),
                "password": "TestPass123",
                "display_name": name,
            }),
        )
        .await
        .expect("register request failed");
    assert_json(response, StatusCode::CREATED)
        .await
        .expect("register should return 201")
}

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let response = server.get("/health").await.expect("request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let response = server.get("/health/ready").await.expect("request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let auth = register(&server, "carol").await;
    assert_eq!(auth.user.display_name, "carol");
    assert!(!auth.tokens.access_token.is_empty());
    assert!(!auth.tokens.refresh_token.is_empty());
}

#[tokio::test]
async fn test_feed_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let response = server.get("/feed").await.expect("request failed");
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_post_with_hashtags() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let auth = register(&server, "dave").await;

    let response = server
        .post_auth(
            "/posts",
            &json!({ "content": "morning run done #running" }),
            &auth.tokens.access_token,
        )
        .await
        .expect("request failed");
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(post.content, "morning run done #running");
    assert_eq!(post.hashtags, vec!["running".to_string()]);
}

#[tokio::test]
async fn test_analytics_synthetic_fallback() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("failed to start server");
    let auth = register(&server, "erin").await;

    let response = server
        .get_auth("/analytics/nutrition?days=7", &auth.tokens.access_token)
        .await
        .expect("request failed");
    let summary: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary["synthetic"], json!(true));
    assert_eq!(summary["days"].as_array().map(Vec::len), Some(7));
}
