pub mod actors;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod genres;
pub mod health;
pub mod movies;
pub mod rating_stars;
pub mod ratings;
pub mod reviews;
pub mod stills;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                   -> auth::router
/// /admin                        -> admin::router (site index, messages, models)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
