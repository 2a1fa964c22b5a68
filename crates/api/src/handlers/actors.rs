//! Handlers for `/admin/actors` (actors and directors share one table).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::ACTORS;
use panda_core::error::CoreError;
use panda_core::slug::validate_required;
use panda_core::types::DbId;
use panda_db::models::actor::{CreateActor, UpdateActor};
use panda_db::repositories::ActorRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, form_payload, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const NAME_MAX_LEN: usize = 100;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Actor", id })
}

fn validate_age(age: Option<i16>) -> AppResult<()> {
    match age {
        Some(age) if age < 0 => Err(AppError::Core(CoreError::Validation(
            "age must not be negative".into(),
        ))),
        _ => Ok(()),
    }
}

/// GET /api/v1/admin/actors
///
/// Rows carry the rendered `get_image` thumbnail.
pub async fn list_actors(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ActorRepo::list(&state.pool, params.limit, params.offset).await?;
    let total = ActorRepo::count(&state.pool).await?;
    let admin = model_admin(&state, ACTORS)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/actors/{id}
pub async fn get_actor(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, ACTORS)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &actor, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/actors
pub async fn create_actor(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: CreateActor = form_payload(model_admin(&state, ACTORS)?, payload)?;
    validate_required("name", &input.name, NAME_MAX_LEN)?;
    validate_age(input.age)?;

    let actor = ActorRepo::create(&state.pool, &input).await?;
    tracing::info!(actor_id = actor.id, user_id = user.user_id, "Actor created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: actor })))
}

/// PUT /api/v1/admin/actors/{id}
pub async fn update_actor(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: UpdateActor = form_payload(model_admin(&state, ACTORS)?, payload)?;
    if let Some(name) = &input.name {
        validate_required("name", name, NAME_MAX_LEN)?;
    }
    validate_age(input.age)?;

    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(actor_id = id, user_id = user.user_id, "Actor updated");
    Ok(Json(DataResponse { data: actor }))
}

/// DELETE /api/v1/admin/actors/{id}
pub async fn delete_actor(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ActorRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(actor_id = id, user_id = user.user_id, "Actor deleted");
    Ok(StatusCode::NO_CONTENT)
}
