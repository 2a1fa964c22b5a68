//! HTTP-level tests for the admin screens: site index, model config, list
//! and change screens, inline saves, save-as-new and error mapping.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_movie, create_user, delete, get, post_json, put_json,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Site index and config
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn index_lists_registered_models(pool: PgPool) {
    let token = admin_token(&pool).await;
    let response = get(common::build_test_app(pool), "/api/v1/admin", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["site_title"], "Panda Movies");
    assert_eq!(json["data"]["site_header"], "Panda Movies");
    let names: Vec<&str> = json["data"]["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "categories",
            "movies",
            "reviews",
            "genres",
            "actors",
            "ratings",
            "stills",
            "rating-stars"
        ]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn movie_config_describes_the_screen(pool: PgPool) {
    let token = admin_token(&pool).await;
    let response = get(common::build_test_app(pool), "/api/v1/admin/movies/config", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let config = &body_json(response).await["data"];
    assert_eq!(config["list_display"], json!(["title", "category", "url", "draft"]));
    assert_eq!(config["list_editable"], json!(["draft"]));
    assert_eq!(config["search_fields"], json!(["title", "category__name"]));
    assert_eq!(config["save_on_top"], true);
    assert_eq!(config["save_as"], true);
    assert_eq!(config["widgets"]["description"]["type"], "rich_text");
    assert_eq!(config["fieldsets"].as_array().unwrap().len(), 6);
    assert_eq!(config["inlines"][0]["model"], "stills");
    assert_eq!(config["inlines"][1]["readonly_fields"], json!(["name", "email"]));

    let actions = config["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["name"], "publish");
    assert_eq!(actions[0]["description"], "Опубликовать");
    assert_eq!(actions[1]["description"], "Снять с публикации");
    assert_eq!(actions[1]["allowed_permissions"], json!(["change"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn viewer_sees_no_actions(pool: PgPool) {
    let (_, token) = create_user(&pool, "viewer", "viewer").await;
    let response = get(common::build_test_app(pool), "/api/v1/admin/movies/config", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["actions"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// List screens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn movie_list_projects_display_columns_and_searches(pool: PgPool) {
    let token = admin_token(&pool).await;
    let category = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/categories",
            &token,
            json!({ "name": "Фантастика", "url": "sci-fi" }),
        )
        .await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/movies",
        &token,
        json!({ "title": "Матрица", "url": "matrix", "category_id": category, "year": 1999 }),
    )
    .await;
    create_movie(&pool, &token, "Шрек", "shrek").await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/movies?q=%D0%A4%D0%B0%D0%BD%D1%82",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    let row = &json["data"][0];
    assert_eq!(row["title"], "Матрица");
    assert_eq!(row["category"], "Фантастика");
    assert_eq!(row["draft"], false);
    assert!(row["id"].is_number());
    assert!(row.get("year").is_none());

    let by_year = body_json(
        get(
            common::build_test_app(pool),
            "/api/v1/admin/movies?year=1999",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(by_year["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn actor_list_renders_thumbnails(pool: PgPool) {
    let token = admin_token(&pool).await;
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/actors",
        &token,
        json!({ "name": "Киану Ривз", "age": 59, "image": "actors/keanu.jpg" }),
    )
    .await;
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/actors",
        &token,
        json!({ "name": "Без фото" }),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/admin/actors", &token).await).await;

    let thumbnail = |name: &str| {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["name"] == name)
            .map(|row| row["get_image"].clone())
            .unwrap()
    };
    assert_eq!(
        thumbnail("Киану Ривз"),
        r#"<img src="/media/actors/keanu.jpg" width="70" height="60">"#
    );
    assert_eq!(thumbnail("Без фото"), "");
}

// ---------------------------------------------------------------------------
// Change screen and inlines
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn movie_change_screen_includes_poster_and_inlines(pool: PgPool) {
    let token = admin_token(&pool).await;
    let created = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/movies",
            &token,
            json!({ "title": "Матрица", "url": "matrix", "poster": "posters/matrix.jpg" }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let saved = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/movies/{id}/stills"),
        &token,
        json!([
            { "title": "Нео", "image": "shots/neo.jpg" },
            { "title": null, "image": null }
        ]),
    )
    .await;
    assert_eq!(saved.status(), StatusCode::OK);
    let stills = body_json(saved).await;
    assert_eq!(stills["data"].as_array().unwrap().len(), 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let view = &body_json(response).await["data"];
    assert_eq!(view["record"]["title"], "Матрица");
    assert_eq!(view["record"]["actors"], json!([]));
    assert_eq!(
        view["readonly"]["get_image"],
        r#"<img src="/media/posters/matrix.jpg" width="105" height="100">"#
    );
    assert_eq!(
        view["inlines"]["stills"][0]["get_image"],
        r#"<img src="/media/shots/neo.jpg" width="110" height="100">"#
    );
    assert!(view["inlines"]["reviews"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn new_still_without_image_is_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_movie(&pool, &token, "Матрица", "matrix").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}/stills"),
        &token,
        json!([{ "title": "Нео" }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reviews_inline_ignores_readonly_fields(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_movie(&pool, &token, "Матрица", "matrix").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}/reviews"),
        &token,
        json!([{ "text": "Классика", "name": "Spoofed", "email": "x@example.com" }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["text"], "Классика");
    assert_eq!(json["data"][0]["name"], "");
    assert_eq!(json["data"][0]["email"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_update_keeps_reviewer_identity(pool: PgPool) {
    let token = admin_token(&pool).await;
    let movie = create_movie(&pool, &token, "Матрица", "matrix").await;
    let review: i64 = sqlx::query_scalar(
        "INSERT INTO reviews (email, name, text, movie_id)
         VALUES ('anna@example.com', 'Anna', 'Great', $1) RETURNING id",
    )
    .bind(movie)
    .fetch_one(&pool)
    .await
    .unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/reviews/{review}"),
        &token,
        json!({ "text": "Great!", "name": "Mallory", "email": "m@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["text"], "Great!");
    assert_eq!(json["data"]["name"], "Anna");
    assert_eq!(json["data"]["email"], "anna@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn explicit_null_clears_category_and_poster(pool: PgPool) {
    let token = admin_token(&pool).await;
    let category = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/categories",
            &token,
            json!({ "name": "Фантастика", "url": "sci-fi" }),
        )
        .await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();
    let id = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/movies",
            &token,
            json!({
                "title": "Матрица",
                "url": "matrix",
                "category_id": category,
                "poster": "posters/matrix.jpg"
            }),
        )
        .await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/movies/{id}"),
        &token,
        json!({ "tagline": "Добро пожаловать в реальный мир" }),
    )
    .await;
    let kept = body_json(response).await;
    assert_eq!(kept["data"]["category_id"], category);
    assert_eq!(kept["data"]["poster"], "posters/matrix.jpg");

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}"),
        &token,
        json!({ "category_id": null, "poster": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = body_json(response).await;
    assert!(cleared["data"]["category_id"].is_null());
    assert!(cleared["data"]["poster"].is_null());
    assert_eq!(cleared["data"]["tagline"], "Добро пожаловать в реальный мир");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn explicit_null_clears_actor_image(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/actors",
            &token,
            json!({ "name": "Киану Ривз", "image": "actors/keanu.jpg" }),
        )
        .await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/actors/{id}"),
        &token,
        json!({ "image": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["image"].is_null());
}

// ---------------------------------------------------------------------------
// Save as new, conflicts and missing records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn save_as_new_creates_a_copy(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_movie(&pool, &token, "Матрица", "matrix").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}/save-as-new"),
        &token,
        json!({ "url": "matrix-2", "title": "Матрица 2" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_ne!(json["data"]["id"].as_i64().unwrap(), id);
    assert_eq!(json["data"]["title"], "Матрица 2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_movie_url_returns_409(pool: PgPool) {
    let token = admin_token(&pool).await;
    create_movie(&pool, &token, "Матрица", "matrix").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/admin/movies",
        &token,
        json!({ "title": "Другая", "url": "matrix" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_category_returns_400(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/admin/movies",
        &token,
        json!({ "title": "Матрица", "url": "matrix", "category_id": 999_999 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_slug_returns_400(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/admin/genres",
        &token,
        json!({ "name": "Драма", "url": "Драма!" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mixed_case_slug_is_accepted(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/admin/genres",
        &token,
        json!({ "name": "Драма", "url": "Drama_1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["url"], "Drama_1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_movie_returns_404(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/movies/999999",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool),
        "/api/v1/admin/movies/999999/stills",
        &token,
        json!([]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_movie_removes_it(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_movie(&pool, &token, "Матрица", "matrix").await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/movies/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/admin/movies/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
