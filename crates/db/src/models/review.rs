//! Review entity model and DTOs.
//!
//! Reviewer `name` and `email` come from the public site and are read-only in
//! the admin, so the admin DTOs never carry them.

use panda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub text: String,
    /// The review this one replies to.
    pub parent_id: Option<DbId>,
    pub movie_id: DbId,
}

/// A review as shown on the admin list screen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewListRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub parent_id: Option<DbId>,
    /// Author name of the parent review.
    pub parent: Option<String>,
    pub movie_id: DbId,
    pub movie: String,
}

/// DTO for creating a review from the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub text: String,
    pub parent_id: Option<DbId>,
    pub movie_id: DbId,
}

/// DTO for editing a review in the admin. An explicit `null` `parent_id`
/// detaches the review from its parent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReview {
    pub text: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub parent_id: Option<Option<DbId>>,
    pub movie_id: Option<DbId>,
}

/// One row of the reviews inline editor on the movie change screen.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInlineRow {
    pub id: Option<DbId>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub parent_id: Option<Option<DbId>>,
    #[serde(default)]
    pub delete: bool,
}

/// Filters for the review list screen.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub movie: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
