//! Handlers for `/admin/stills` (movie shots).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::STILLS;
use panda_core::error::CoreError;
use panda_core::slug::validate_required;
use panda_core::types::DbId;
use panda_db::models::movie_shot::{CreateMovieShot, UpdateMovieShot};
use panda_db::repositories::MovieShotRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, form_payload, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::query::MovieChildParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) const TITLE_MAX_LEN: usize = 100;
pub(crate) const IMAGE_MAX_LEN: usize = 255;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MovieShot",
        id,
    })
}

/// GET /api/v1/admin/stills
///
/// Optional `?movie=` restricts the list to one movie's stills.
pub async fn list_stills(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<MovieChildParams>,
) -> AppResult<impl IntoResponse> {
    let rows = MovieShotRepo::list(&state.pool, params.movie, params.limit, params.offset).await?;
    let total = MovieShotRepo::count(&state.pool, params.movie).await?;
    let admin = model_admin(&state, STILLS)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/stills/{id}
pub async fn get_still(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let still = MovieShotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, STILLS)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &still, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/stills
pub async fn create_still(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: CreateMovieShot = form_payload(model_admin(&state, STILLS)?, payload)?;
    validate_required("title", &input.title, TITLE_MAX_LEN)?;
    validate_required("image", &input.image, IMAGE_MAX_LEN)?;

    let still = MovieShotRepo::create(&state.pool, &input).await?;
    tracing::info!(
        still_id = still.id,
        movie_id = still.movie_id,
        user_id = user.user_id,
        "Still created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: still })))
}

/// PUT /api/v1/admin/stills/{id}
pub async fn update_still(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: UpdateMovieShot = form_payload(model_admin(&state, STILLS)?, payload)?;
    if let Some(title) = &input.title {
        validate_required("title", title, TITLE_MAX_LEN)?;
    }
    if let Some(image) = &input.image {
        validate_required("image", image, IMAGE_MAX_LEN)?;
    }

    let still = MovieShotRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(still_id = id, user_id = user.user_id, "Still updated");
    Ok(Json(DataResponse { data: still }))
}

/// DELETE /api/v1/admin/stills/{id}
pub async fn delete_still(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MovieShotRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(still_id = id, user_id = user.user_id, "Still deleted");
    Ok(StatusCode::NO_CONTENT)
}
