use axum::routing::get;
use axum::Router;
use panda_core::admin::registry::ACTORS;

use crate::handlers::actors;
use crate::routes::admin::config_route;
use crate::state::AppState;

/// Routes mounted at `/admin/actors`.
///
/// ```text
/// GET    /                      -> list_actors
/// POST   /                      -> create_actor
/// GET    /config                -> admin config
/// GET    /{id}                  -> get_actor
/// PUT    /{id}                  -> update_actor
/// DELETE /{id}                  -> delete_actor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actors::list_actors).post(actors::create_actor))
        .route("/config", config_route(ACTORS))
        .route(
            "/{id}",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
}
