//! Shared query parameter types for API handlers.

use panda_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pagination plus an optional parent movie filter (`?movie=`).
#[derive(Debug, Deserialize)]
pub struct MovieChildParams {
    pub movie: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
