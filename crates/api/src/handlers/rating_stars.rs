//! Handlers for `/admin/rating-stars`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::RATING_STARS;
use panda_core::error::CoreError;
use panda_core::types::DbId;
use panda_db::models::rating::{CreateRatingStar, UpdateRatingStar};
use panda_db::repositories::RatingStarRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RatingStar",
        id,
    })
}

/// GET /api/v1/admin/rating-stars
pub async fn list_rating_stars(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = RatingStarRepo::list(&state.pool).await?;
    let total = rows.len() as i64;
    let admin = model_admin(&state, RATING_STARS)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/rating-stars/{id}
pub async fn get_rating_star(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let star = RatingStarRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, RATING_STARS)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &star, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/rating-stars
pub async fn create_rating_star(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(input): Json<CreateRatingStar>,
) -> AppResult<impl IntoResponse> {
    let star = RatingStarRepo::create(&state.pool, &input).await?;
    tracing::info!(
        star_id = star.id,
        value = star.value,
        user_id = user.user_id,
        "Rating star created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: star })))
}

/// PUT /api/v1/admin/rating-stars/{id}
pub async fn update_rating_star(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRatingStar>,
) -> AppResult<impl IntoResponse> {
    let star = RatingStarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(star_id = id, user_id = user.user_id, "Rating star updated");
    Ok(Json(DataResponse { data: star }))
}

/// DELETE /api/v1/admin/rating-stars/{id}
///
/// Ratings that used the star are deleted with it.
pub async fn delete_rating_star(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !RatingStarRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(star_id = id, user_id = user.user_id, "Rating star deleted");
    Ok(StatusCode::NO_CONTENT)
}
