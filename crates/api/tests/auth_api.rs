//! Login and authorization tests.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_anonymous, post_json, post_json_anonymous, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_a_usable_token(pool: PgPool) {
    create_user(&pool, "editor", "editor").await;

    let response = post_json_anonymous(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "username": "editor", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "editor");
    assert_eq!(json["user"]["role"], "editor");
    assert_eq!(json["expires_in"], 3600);

    let token = json["access_token"].as_str().unwrap();
    let response = get(common::build_test_app(pool), "/api/v1/admin", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_rejected(pool: PgPool) {
    create_user(&pool, "editor", "editor").await;

    let response = post_json_anonymous(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        json!({ "username": "editor", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_looks_like_wrong_password(pool: PgPool) {
    let response = post_json_anonymous(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_user_cannot_log_in(pool: PgPool) {
    create_user(&pool, "former", "editor").await;
    sqlx::query("UPDATE users SET is_active = false WHERE username = 'former'")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json_anonymous(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        json!({ "username": "former", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_requires_a_token(pool: PgPool) {
    let response = get_anonymous(common::build_test_app(pool.clone()), "/api/v1/admin/movies").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/admin/movies",
        "not-a-jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn viewer_can_read_but_not_write(pool: PgPool) {
    let (_, token) = create_user(&pool, "viewer", "viewer").await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/admin/genres", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/admin/genres",
        &token,
        json!({ "name": "Драма", "url": "drama" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_cannot_delete(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let (_, editor) = create_user(&pool, "editor", "editor").await;
    let id = common::create_movie(&pool, &admin, "Матрица", "matrix").await;

    let response = common::delete(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}"),
        &editor,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
