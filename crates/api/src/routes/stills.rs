use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::STILLS;

use crate::handlers::stills;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/stills`.
///
/// ```text
/// GET    /                      -> list_stills
/// POST   /                      -> create_still
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_still
/// PUT    /{id}                  -> update_still
/// DELETE /{id}                  -> delete_still
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stills::list_stills).post(stills::create_still))
        .route("/config", config_route(STILLS))
        .route(
            "/{id}",
            get(stills::get_still)
                .put(stills::update_still)
                .delete(stills::delete_still),
        )
}
