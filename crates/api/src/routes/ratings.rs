use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::RATINGS;

use crate::handlers::ratings;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/ratings`.
///
/// ```text
/// GET    /                      -> list_ratings
/// POST   /                      -> create_rating
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_rating
/// PUT    /{id}                  -> update_rating
/// DELETE /{id}                  -> delete_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ratings::list_ratings).post(ratings::create_rating))
        .route("/config", config_route(RATINGS))
        .route(
            "/{id}",
            get(ratings::get_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
}
