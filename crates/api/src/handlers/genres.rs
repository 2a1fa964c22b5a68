//! Handlers for `/admin/genres`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::GENRES;
use panda_core::error::CoreError;
use panda_core::slug::{validate_required, validate_slug};
use panda_core::types::DbId;
use panda_db::models::genre::{CreateGenre, UpdateGenre};
use panda_db::repositories::GenreRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const NAME_MAX_LEN: usize = 100;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Genre",
        id,
    })
}

/// GET /api/v1/admin/genres
pub async fn list_genres(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let rows = GenreRepo::list(&state.pool, params.limit, params.offset).await?;
    let total = GenreRepo::count(&state.pool).await?;
    let admin = model_admin(&state, GENRES)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/genres/{id}
pub async fn get_genre(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, GENRES)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &genre, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/genres
pub async fn create_genre(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(input): Json<CreateGenre>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name, NAME_MAX_LEN)?;
    validate_slug(&input.url)?;

    let genre = GenreRepo::create(&state.pool, &input).await?;
    tracing::info!(genre_id = genre.id, user_id = user.user_id, "Genre created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: genre })))
}

/// PUT /api/v1/admin/genres/{id}
pub async fn update_genre(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGenre>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_required("name", name, NAME_MAX_LEN)?;
    }
    if let Some(url) = &input.url {
        validate_slug(url)?;
    }

    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(genre_id = id, user_id = user.user_id, "Genre updated");
    Ok(Json(DataResponse { data: genre }))
}

/// DELETE /api/v1/admin/genres/{id}
///
/// Removes the genre from every movie that listed it.
pub async fn delete_genre(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !GenreRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(genre_id = id, user_id = user.user_id, "Genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
