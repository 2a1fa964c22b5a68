//! Site-level admin handlers and helpers shared by the per-model handlers.
//!
//! The per-model modules fetch typed rows from the repositories; the helpers
//! here project them onto the screens declared in the admin registry
//! (list columns, read-only thumbnails, inline rows).

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use panda_core::admin::actions::ActionInfo;
use panda_core::admin::site::ModelEntry;
use panda_core::admin::{InlineAdmin, ModelAdmin};
use panda_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequirePermission, RequireView};
use crate::response::{DataResponse, ListPage};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body of `GET /admin`.
#[derive(Debug, Serialize)]
pub struct SiteIndex {
    pub site_title: &'static str,
    pub site_header: &'static str,
    pub models: Vec<ModelEntry>,
}

/// A change screen: the record, its computed read-only values and inline
/// child rows keyed by inline model name.
#[derive(Debug, Serialize)]
pub struct ChangeView {
    pub record: Value,
    pub readonly: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inlines: BTreeMap<&'static str, Vec<Map<String, Value>>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin
///
/// Site title, header and the registered models.
pub async fn index(
    RequirePermission(_user, _): RequireView,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: SiteIndex {
            site_title: state.site.site_title,
            site_header: state.site.site_header,
            models: state.site.index(),
        },
    }))
}

/// GET /api/v1/admin/messages
///
/// Drain the caller's queued status messages.
pub async fn drain_messages(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let messages = state.messages.drain(user.user_id).await;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/admin/{model}/config
///
/// The model's admin configuration, with `actions` narrowed to the ones the
/// caller is allowed to run.
pub fn model_config(
    state: &AppState,
    user: &AuthUser,
    model: &str,
) -> AppResult<Json<DataResponse<Value>>> {
    let admin = model_admin(state, model)?;
    let actions: Vec<ActionInfo> = admin
        .actions_for(&user.role)
        .into_iter()
        .map(ActionInfo::from)
        .collect();

    let mut config = to_json(admin)?;
    if let Some(obj) = config.as_object_mut() {
        obj.insert("actions".to_string(), to_json(&actions)?);
    }
    Ok(Json(DataResponse { data: config }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a registered model's admin configuration.
pub fn model_admin<'a>(state: &'a AppState, model: &str) -> AppResult<&'a ModelAdmin> {
    state.site.get(model).ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Model '{model}' is not registered with the admin site"
        )))
    })
}

/// Project typed rows onto the model's list columns.
pub fn list_page<T: Serialize>(
    admin: &ModelAdmin,
    rows: &[T],
    total: i64,
    media_url: &str,
) -> AppResult<ListPage<Map<String, Value>>> {
    let data = rows
        .iter()
        .map(|row| Ok(admin.list_row(&to_json(row)?, media_url)))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(ListPage { data, total })
}

/// Build a change screen for a record without inlines.
pub fn change_view<T: Serialize>(
    admin: &ModelAdmin,
    record: &T,
    media_url: &str,
) -> AppResult<ChangeView> {
    let record = to_json(record)?;
    let readonly = admin.readonly_values(&record, media_url);
    Ok(ChangeView {
        record,
        readonly,
        inlines: BTreeMap::new(),
    })
}

/// Serialize inline child rows with their computed columns filled in.
pub fn inline_rows<T: Serialize>(
    inline: &InlineAdmin,
    rows: &[T],
    media_url: &str,
) -> AppResult<Vec<Map<String, Value>>> {
    rows.iter()
        .map(|row| Ok(inline.row(&to_json(row)?, media_url)))
        .collect()
}

/// Deserialize a form payload after dropping the model's read-only fields.
pub fn form_payload<T: DeserializeOwned>(admin: &ModelAdmin, mut payload: Value) -> AppResult<T> {
    admin.strip_readonly(&mut payload);
    serde_json::from_value(payload).map_err(|e| AppError::BadRequest(format!("Invalid form: {e}")))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize record: {e}")))
}
