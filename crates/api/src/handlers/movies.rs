//! Handlers for `/admin/movies`.
//!
//! Besides CRUD this covers the movie-specific admin features: the change
//! screen with stills and reviews inlines, inline saves, save-as-new, the
//! list-editable `draft` column and the publish / unpublish bulk actions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::registry::{MOVIES, REVIEWS, STILLS};
use panda_core::admin::{AdminAction, InlineAdmin, ModelAdmin};
use panda_core::error::CoreError;
use panda_core::permissions::has_all;
use panda_core::slug::{validate_required, validate_slug};
use panda_core::status_message::StatusMessage;
use panda_core::types::DbId;
use panda_db::models::movie::{
    CreateMovie, DraftEdit, MovieListParams, MovieWithRelations, UpdateMovie,
};
use panda_db::models::movie_shot::MovieShotInlineRow;
use panda_db::models::review::ReviewInlineRow;
use panda_db::repositories::{MovieRepo, MovieShotRepo, ReviewRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::admin::{change_view, form_payload, inline_rows, list_page, model_admin};
use crate::handlers::reviews::TEXT_MAX_LEN;
use crate::handlers::stills::{IMAGE_MAX_LEN, TITLE_MAX_LEN};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{
    RequireAdd, RequireChange, RequireDelete, RequirePermission, RequireView,
};
use crate::response::DataResponse;
use crate::state::AppState;

const TAGLINE_MAX_LEN: usize = 100;
const COUNTRY_MAX_LEN: usize = 30;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/movies/actions/{action}`.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub ids: Vec<DbId>,
}

/// Outcome of a batch write on the movie list screen.
#[derive(Debug, Serialize)]
pub struct BulkUpdateResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AdminAction>,
    /// Rows matched by the write.
    pub count: u64,
    pub message: StatusMessage,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

fn inline_admin<'a>(admin: &'a ModelAdmin, model: &str) -> AppResult<&'a InlineAdmin> {
    admin
        .inlines
        .iter()
        .find(|i| i.model == model)
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(format!(
                "{} has no '{model}' inline",
                admin.name
            )))
        })
}

fn validate_movie_fields(
    title: Option<&str>,
    tagline: Option<&str>,
    country: Option<&str>,
    url: Option<&str>,
) -> AppResult<()> {
    if let Some(title) = title {
        validate_required("title", title, TITLE_MAX_LEN)?;
    }
    if let Some(tagline) = tagline {
        if tagline.chars().count() > TAGLINE_MAX_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "tagline must be at most {TAGLINE_MAX_LEN} characters"
            ))));
        }
    }
    if let Some(country) = country {
        if country.chars().count() > COUNTRY_MAX_LEN {
            return Err(AppError::Core(CoreError::Validation(format!(
                "country must be at most {COUNTRY_MAX_LEN} characters"
            ))));
        }
    }
    if let Some(url) = url {
        validate_slug(url)?;
    }
    Ok(())
}

async fn ensure_movie_exists(state: &AppState, id: DbId) -> AppResult<()> {
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

/// Record a batch result in the caller's message queue and build the body.
async fn report_bulk_update(
    state: &AppState,
    user: &AuthUser,
    action: Option<AdminAction>,
    count: u64,
) -> BulkUpdateResult {
    let message = StatusMessage::rows_updated(count, state.config.plural_rule);
    state.messages.push(user.user_id, message.clone()).await;
    BulkUpdateResult {
        action,
        count,
        message,
    }
}

// ---------------------------------------------------------------------------
// List and change screens
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/movies
///
/// `?q=` searches title and category name; `?category=`, `?year=` and
/// `?draft=` filter.
pub async fn list_movies(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = MovieRepo::list(&state.pool, &params).await?;
    let total = MovieRepo::count(&state.pool, &params).await?;
    let admin = model_admin(&state, MOVIES)?;
    Ok(Json(list_page(admin, &rows, total, &state.config.media_url)?))
}

/// GET /api/v1/admin/movies/{id}
///
/// The change screen: movie with relations, poster thumbnail and the stills
/// and reviews inlines.
pub async fn get_movie(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let relations = MovieRepo::relations(&state.pool, id).await?;
    let stills = MovieShotRepo::list_for_movie(&state.pool, id).await?;
    let reviews = ReviewRepo::list_for_movie(&state.pool, id).await?;

    let media_url = &state.config.media_url;
    let admin = model_admin(&state, MOVIES)?;
    let mut view = change_view(admin, &MovieWithRelations { movie, relations }, media_url)?;
    for inline in &admin.inlines {
        let rows = match inline.model {
            STILLS => inline_rows(inline, &stills, media_url)?,
            REVIEWS => inline_rows(inline, &reviews, media_url)?,
            _ => continue,
        };
        view.inlines.insert(inline.model, rows);
    }

    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/movies
pub async fn create_movie(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: CreateMovie = form_payload(model_admin(&state, MOVIES)?, payload)?;
    validate_movie_fields(
        Some(input.title.as_str()),
        input.tagline.as_deref(),
        input.country.as_deref(),
        Some(input.url.as_str()),
    )?;

    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, user_id = user.user_id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/admin/movies/{id}
pub async fn update_movie(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let input: UpdateMovie = form_payload(model_admin(&state, MOVIES)?, payload)?;
    validate_movie_fields(
        input.title.as_deref(),
        input.tagline.as_deref(),
        input.country.as_deref(),
        input.url.as_deref(),
    )?;

    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(movie_id = id, user_id = user.user_id, "Movie updated");
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/admin/movies/{id}
///
/// Stills, reviews, ratings and relation links are deleted with the movie.
pub async fn delete_movie(
    RequirePermission(user, _): RequireDelete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, user_id = user.user_id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/movies/{id}/save-as-new
///
/// Create a copy of the movie with the submitted changes applied. The copy
/// needs its own `url`, so the form usually changes it.
pub async fn save_as_new(
    RequirePermission(user, _): RequireAdd,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let admin = model_admin(&state, MOVIES)?;
    if !admin.save_as {
        return Err(AppError::BadRequest(
            "Save as new is not enabled for movies".into(),
        ));
    }
    let changes: UpdateMovie = form_payload(admin, payload)?;
    validate_movie_fields(
        changes.title.as_deref(),
        changes.tagline.as_deref(),
        changes.country.as_deref(),
        changes.url.as_deref(),
    )?;

    let copy = MovieRepo::save_as_new(&state.pool, id, changes)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        movie_id = copy.id,
        source_id = id,
        user_id = user.user_id,
        "Movie saved as new"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

// ---------------------------------------------------------------------------
// List screen batch writes
// ---------------------------------------------------------------------------

/// PATCH /api/v1/admin/movies
///
/// Save the list-editable `draft` column: `[{ "id": 1, "draft": true }, ...]`.
pub async fn save_list_editable(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Json(edits): Json<Vec<DraftEdit>>,
) -> AppResult<impl IntoResponse> {
    let admin = model_admin(&state, MOVIES)?;
    if !admin.list_editable.contains(&"draft") {
        return Err(AppError::BadRequest(
            "draft is not editable on the movie list".into(),
        ));
    }

    let count = MovieRepo::save_draft_edits(&state.pool, &edits).await?;
    tracing::info!(count, user_id = user.user_id, "Movie list edits saved");

    let result = report_bulk_update(&state, &user, None, count).await;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/admin/movies/actions/{action}
///
/// Run a bulk action (`publish` / `unpublish`) over `{ "ids": [...] }`.
/// The status message is returned and queued for the caller. A failed write
/// returns an error and queues nothing.
pub async fn run_action(
    user: AuthUser,
    State(state): State<AppState>,
    Path(action): Path<String>,
    Json(input): Json<ActionRequest>,
) -> AppResult<impl IntoResponse> {
    let action: AdminAction = action.parse()?;
    let admin = model_admin(&state, MOVIES)?;
    if !admin.has_action(action) {
        return Err(AppError::BadRequest(format!(
            "Action '{action}' is not available for movies"
        )));
    }
    if !has_all(&user.role, action.allowed_permissions()) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Action '{action}' requires permission: {}",
            action
                .allowed_permissions()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))));
    }

    let count = MovieRepo::set_draft(&state.pool, &input.ids, action.draft_value()).await?;
    tracing::info!(
        action = %action,
        selected = input.ids.len(),
        count,
        user_id = user.user_id,
        "Bulk action applied"
    );

    let result = report_bulk_update(&state, &user, Some(action), count).await;
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// Inline saves
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/movies/{id}/stills
///
/// Save the stills inline. Blank extra rows are skipped; a new row needs a
/// title and an image.
pub async fn save_stills(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(rows): Json<Vec<MovieShotInlineRow>>,
) -> AppResult<impl IntoResponse> {
    ensure_movie_exists(&state, id).await?;

    let rows: Vec<MovieShotInlineRow> = rows
        .into_iter()
        .filter(|r| r.id.is_some() || !is_blank_still(r))
        .collect();
    for row in &rows {
        if row.delete {
            continue;
        }
        match (row.id, &row.title, &row.image) {
            (None, Some(title), Some(image)) => {
                validate_required("title", title, TITLE_MAX_LEN)?;
                validate_required("image", image, IMAGE_MAX_LEN)?;
            }
            (None, _, _) => {
                return Err(AppError::Core(CoreError::Validation(
                    "A new still needs a title and an image".into(),
                )));
            }
            (Some(_), title, image) => {
                if let Some(title) = title {
                    validate_required("title", title, TITLE_MAX_LEN)?;
                }
                if let Some(image) = image {
                    validate_required("image", image, IMAGE_MAX_LEN)?;
                }
            }
        }
    }

    let stills = MovieShotRepo::save_inline(&state.pool, id, &rows).await?;
    tracing::info!(
        movie_id = id,
        rows = rows.len(),
        user_id = user.user_id,
        "Stills inline saved"
    );

    let admin = model_admin(&state, MOVIES)?;
    let inline = inline_admin(admin, STILLS)?;
    Ok(Json(DataResponse {
        data: inline_rows(inline, &stills, &state.config.media_url)?,
    }))
}

/// PUT /api/v1/admin/movies/{id}/reviews
///
/// Save the reviews inline. Reviewer `name` / `email` are read-only and
/// ignored; blank extra rows are skipped.
pub async fn save_reviews(
    RequirePermission(user, _): RequireChange,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(rows): Json<Vec<ReviewInlineRow>>,
) -> AppResult<impl IntoResponse> {
    ensure_movie_exists(&state, id).await?;

    let rows: Vec<ReviewInlineRow> = rows
        .into_iter()
        .filter(|r| r.id.is_some() || r.text.as_deref().is_some_and(|t| !t.trim().is_empty()))
        .collect();
    for row in rows.iter().filter(|r| !r.delete) {
        if let Some(text) = &row.text {
            validate_required("text", text, TEXT_MAX_LEN)?;
        }
    }

    let reviews = ReviewRepo::save_inline(&state.pool, id, &rows).await?;
    tracing::info!(
        movie_id = id,
        rows = rows.len(),
        user_id = user.user_id,
        "Reviews inline saved"
    );

    let admin = model_admin(&state, MOVIES)?;
    let inline = inline_admin(admin, REVIEWS)?;
    Ok(Json(DataResponse {
        data: inline_rows(inline, &reviews, &state.config.media_url)?,
    }))
}

fn is_blank_still(row: &MovieShotInlineRow) -> bool {
    let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
    blank(&row.title) && blank(&row.description) && blank(&row.image)
}
