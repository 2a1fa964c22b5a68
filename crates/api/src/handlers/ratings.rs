//! Handlers for `/admin/ratings`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::RATINGS;
use panda_core::error::CoreError;
use panda_core::slug::validate_required;
use panda_core::types::DbId;
use panda_db::models::rating::{CreateRating, UpdateRating};
use panda_db::repositories::RatingRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Long enough for a textual IPv6 address.
const IP_MAX_LEN: usize = 45;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Rating",
        id,
    })
}

/// GET /api/v1/admin/ratings
pub async fn list_ratings(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let rows = RatingRepo::list(&state.pool, params.limit, params.offset).await?;
    let total = RatingRepo::count(&state.pool).await?;
    let admin = model_admin(&state, RATINGS)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/ratings/{id}
pub async fn get_rating(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rating = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, RATINGS)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &rating, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/ratings
pub async fn create_rating(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(input): Json<CreateRating>,
) -> AppResult<impl IntoResponse> {
    validate_required("ip", &input.ip, IP_MAX_LEN)?;

    let rating = RatingRepo::create(&state.pool, &input).await?;
    tracing::info!(
        rating_id = rating.id,
        movie_id = rating.movie_id,
        user_id = user.user_id,
        "Rating created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: rating })))
}

/// PUT /api/v1/admin/ratings/{id}
pub async fn update_rating(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRating>,
) -> AppResult<impl IntoResponse> {
    if let Some(ip) = &input.ip {
        validate_required("ip", ip, IP_MAX_LEN)?;
    }

    let rating = RatingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(rating_id = id, user_id = user.user_id, "Rating updated");
    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /api/v1/admin/ratings/{id}
pub async fn delete_rating(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !RatingRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(rating_id = id, user_id = user.user_id, "Rating deleted");
    Ok(StatusCode::NO_CONTENT)
}
