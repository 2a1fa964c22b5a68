//! Admin site routes mounted at `/admin`.

use axum::extract::State;
use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::handlers::admin;
use crate::middleware::rbac::{RequirePermission, RequireView};
use crate::routes::{actors, categories, genres, movies, rating_stars, ratings, reviews, stills};
use crate::state::AppState;

/// ```text
/// GET    /                      -> index
/// GET    /messages              -> drain_messages
/// /categories, /genres, /actors, /movies, /stills,
/// /reviews, /ratings, /rating-stars   -> per-model routers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/messages", get(admin::drain_messages))
        .nest("/categories", categories::router())
        .nest("/genres", genres::router())
        .nest("/actors", actors::router())
        .nest("/movies", movies::router())
        .nest("/stills", stills::router())
        .nest("/reviews", reviews::router())
        .nest("/ratings", ratings::router())
        .nest("/rating-stars", rating_stars::router())
}

/// `GET /config` for the model registered under `model`.
pub fn config_route(model: &'static str) -> MethodRouter<AppState> {
    get(
        move |RequirePermission(user, _): RequireView, State(state): State<AppState>| async move {
            admin::model_config(&state, &user, model)
        },
    )
}
