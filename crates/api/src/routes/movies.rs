use axum::routing::{get, post, put};
use axum::Router;
use panda_core::admin::registry::MOVIES;

use crate::handlers::movies;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/movies`.
///
/// ```text
/// GET    /                      -> list_movies
/// POST   /                      -> create_movie
/// PATCH  /                      -> save_list_editable
/// GET    /config                -> admin config
/// POST   /actions/{action}      -> run_action
/// GET    /{id}                  -> get_movie
/// PUT    /{id}                  -> update_movie
/// DELETE /{id}                  -> delete_movie
/// POST   /{id}/save-as-new      -> save_as_new
/// PUT    /{id}/stills           -> save_stills
/// PUT    /{id}/reviews          -> save_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(movies::list_movies)
                .post(movies::create_movie)
                .patch(movies::save_list_editable),
        )
        .route("/config", config_route(MOVIES))
        .route("/actions/{action}", post(movies::run_action))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/{id}/save-as-new", post(movies::save_as_new))
        .route("/{id}/stills", put(movies::save_stills))
        .route("/{id}/reviews", put(movies::save_reviews))
}
