use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::RATING_STARS;

use crate::handlers::rating_stars;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/rating-stars`.
///
/// ```text
/// GET    /                      -> list_rating_stars
/// POST   /                      -> create_rating_star
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_rating_star
/// PUT    /{id}                  -> update_rating_star
/// DELETE /{id}                  -> delete_rating_star
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(rating_stars::list_rating_stars).post(rating_stars::create_rating_star),
        )
        .route("/config", config_route(RATING_STARS))
        .route(
            "/{id}",
            get(rating_stars::get_rating_star)
                .put(rating_stars::update_rating_star)
                .delete(rating_stars::delete_rating_star),
        )
}
