use std::sync::Arc;

use panda_core::admin::AdminSite;

use crate::config::ServerConfig;
use crate::messages::MessageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: panda_db::DbPool,
    /// Server configuration (media URL, message locale, JWT settings).
    pub config: Arc<ServerConfig>,
    /// Registered admin screens, validated at startup.
    pub site: Arc<AdminSite>,
    /// Per-user transient status messages.
    pub messages: Arc<MessageStore>,
}
