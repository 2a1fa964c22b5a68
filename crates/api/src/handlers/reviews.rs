//! Handlers for `/admin/reviews`.
//!
//! Reviewer `name` and `email` are read-only here: they are dropped from
//! incoming forms before deserialization.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::REVIEWS;
use panda_core::error::CoreError;
use panda_core::slug::validate_required;
use panda_core::types::DbId;
use panda_db::models::review::{CreateReview, ReviewListParams, UpdateReview};
use panda_db::repositories::ReviewRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, form_payload, list_page, model_admin};
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) const TEXT_MAX_LEN: usize = 5000;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}

/// GET /api/v1/admin/reviews
pub async fn list_reviews(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ReviewRepo::list(&state.pool, &params).await?;
    let total = ReviewRepo::count(&state.pool, &params).await?;
    let admin = model_admin(&state, REVIEWS)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/reviews/{id}
pub async fn get_review(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let admin = model_admin(&state, REVIEWS)?;
    Ok(Json(DataResponse {
        data: change_view(admin, &review, &state.config.media_url)?,
    }))
}

/// POST /api/v1/admin/reviews
pub async fn create_review(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: CreateReview = form_payload(model_admin(&state, REVIEWS)?, payload)?;
    validate_required("text", &input.text, TEXT_MAX_LEN)?;

    let review = ReviewRepo::create(&state.pool, &input).await?;
    tracing::info!(
        review_id = review.id,
        movie_id = review.movie_id,
        user_id = user.user_id,
        "Review created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// PUT /api/v1/admin/reviews/{id}
pub async fn update_review(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: UpdateReview = form_payload(model_admin(&state, REVIEWS)?, payload)?;
    if let Some(text) = &input.text {
        validate_required("text", text, TEXT_MAX_LEN)?;
    }
    if input.parent_id == Some(Some(id)) {
        return Err(AppError::Core(CoreError::Validation(
            "A review cannot reply to itself".into(),
        )));
    }

    let review = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(review_id = id, user_id = user.user_id, "Review updated");
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/admin/reviews/{id}
///
/// Replies to the review are kept and lose their parent.
pub async fn delete_review(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(review_id = id, user_id = user.user_id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
