#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use panda_core::admin::registry::build_site;
use panda_core::status_message::PluralRule;
use panda_core::types::DbId;
use panda_db::models::user::CreateUser;
use panda_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

use panda_api::auth::jwt::{generate_access_token, JwtConfig};
use panda_api::auth::password::hash_password;
use panda_api::config::ServerConfig;
use panda_api::messages::MessageStore;
use panda_api::router::build_app_router;
use panda_api::state::AppState;

pub const TEST_PASSWORD: &str = "panda-test-password";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_url: "/media/".to_string(),
        plural_rule: PluralRule::Slavic,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        bootstrap_admin: None,
    }
}

/// Build the full application router, with the production middleware
/// stack, around the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), Arc::new(MessageStore::new()))
}

/// Like [`build_test_app`] but with an explicit config and message store,
/// so a test can share the store across several requests.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    messages: Arc<MessageStore>,
) -> Router {
    let site = build_site().expect("admin site must be valid");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        site: Arc::new(site),
        messages,
    };
    build_app_router(state, &config)
}

/// Insert a user with the given role and return its id and an access token.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, &user.role, &test_config().jwt).unwrap();
    (user.id, token)
}

pub async fn admin_token(pool: &PgPool) -> String {
    create_user(pool, "admin", "admin").await.1
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_json_anonymous(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Create a movie through the API and return its id.
pub async fn create_movie(pool: &PgPool, token: &str, title: &str, url: &str) -> DbId {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/admin/movies",
        token,
        serde_json::json!({ "title": title, "url": url }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
