//! Handlers for `/admin/categories`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::CATEGORIES;
use panda_core::error::CoreError;
use panda_core::slug::{validate_required, validate_slug};
use panda_core::types::DbId;
use panda_db::models::category::{CreateCategory, UpdateCategory};
use panda_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const NAME_MAX_LEN: usize = 150;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/admin/categories
pub async fn list_categories(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let rows = CategoryRepo::list(&state.pool, params.limit, params.offset).await?;
    let total = CategoryRepo::count(&state.pool).await?;
    let admin = model_admin(&state, CATEGORIES)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, CATEGORIES)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &category, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name, NAME_MAX_LEN)?;
    validate_slug(&input.url)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, user_id = user.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_required("name", name, NAME_MAX_LEN)?;
    }
    if let Some(url) = &input.url {
        validate_slug(url)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(category_id = id, user_id = user.user_id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Movies in the category keep existing with no category.
pub async fn delete_category(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, user_id = user.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
