use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::GENRES;

use crate::handlers::genres;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/genres`.
///
/// ```text
/// GET    /                      -> list_genres
/// POST   /                      -> create_genre
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_genre
/// PUT    /{id}                  -> update_genre
/// DELETE /{id}                  -> delete_genre
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list_genres).post(genres::create_genre))
        .route("/config", config_route(GENRES))
        .route(
            "/{id}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
}
