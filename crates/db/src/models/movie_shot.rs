//! Movie still ("shot") entity model and DTOs.

use panda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movie_shots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieShot {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub movie_id: DbId,
}

/// A still as shown on the admin list screen, with its movie title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieShotListRow {
    pub id: DbId,
    pub title: String,
    pub image: String,
    pub movie_id: DbId,
    pub movie: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovieShot {
    pub title: String,
    pub description: Option<String>,
    pub image: String,
    pub movie_id: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieShot {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub movie_id: Option<DbId>,
}

/// One row of the stills inline editor on the movie change screen.
///
/// Rows without `id` are new; rows with `delete: true` are removed.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieShotInlineRow {
    pub id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub delete: bool,
}
