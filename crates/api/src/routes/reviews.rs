use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::REVIEWS;

use crate::handlers::reviews;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/reviews`.
///
/// ```text
/// GET    /                      -> list_reviews
/// POST   /                      -> create_review
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_review
/// PUT    /{id}                  -> update_review
/// DELETE /{id}                  -> delete_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/config", config_route(REVIEWS))
        .route(
            "/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
}
