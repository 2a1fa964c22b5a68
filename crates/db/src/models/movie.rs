//! Movie entity model and DTOs.

use chrono::NaiveDate;
use panda_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub tagline: String,
    /// Rich-text HTML.
    pub description: String,
    pub poster: Option<String>,
    pub year: i16,
    pub country: String,
    pub world_premiere: NaiveDate,
    pub budget: i32,
    pub fees_in_usa: i32,
    pub fees_in_world: i32,
    pub category_id: Option<DbId>,
    pub url: String,
    /// `true` hides the movie from public listings.
    pub draft: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie as shown on the admin list screen, with its category name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieListRow {
    pub id: DbId,
    pub title: String,
    pub category_id: Option<DbId>,
    pub category: Option<String>,
    pub url: String,
    pub draft: bool,
    pub year: i16,
    pub poster: Option<String>,
}

/// Many-to-many links of a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRelations {
    pub actors: Vec<DbId>,
    pub directors: Vec<DbId>,
    pub genres: Vec<DbId>,
}

/// DTO for creating a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub year: Option<i16>,
    pub country: Option<String>,
    pub world_premiere: Option<NaiveDate>,
    pub budget: Option<i32>,
    pub fees_in_usa: Option<i32>,
    pub fees_in_world: Option<i32>,
    pub category_id: Option<DbId>,
    pub url: String,
    /// Defaults to `false` (published) if omitted.
    pub draft: Option<bool>,
    #[serde(default)]
    pub actors: Vec<DbId>,
    #[serde(default)]
    pub directors: Vec<DbId>,
    #[serde(default)]
    pub genres: Vec<DbId>,
}

/// DTO for updating a movie. All fields are optional; relation lists
/// replace the existing links when present. `poster` and `category_id`
/// are cleared by an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub poster: Option<Option<String>>,
    pub year: Option<i16>,
    pub country: Option<String>,
    pub world_premiere: Option<NaiveDate>,
    pub budget: Option<i32>,
    pub fees_in_usa: Option<i32>,
    pub fees_in_world: Option<i32>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub category_id: Option<Option<DbId>>,
    pub url: Option<String>,
    pub draft: Option<bool>,
    pub actors: Option<Vec<DbId>>,
    pub directors: Option<Vec<DbId>>,
    pub genres: Option<Vec<DbId>>,
}

impl CreateMovie {
    /// Build a create DTO from an existing movie with `changes` applied on top.
    ///
    /// Backs "save as new": the copy keeps every field and relation of the
    /// original that the form did not change.
    pub fn from_existing(movie: Movie, relations: MovieRelations, changes: UpdateMovie) -> Self {
        Self {
            title: changes.title.unwrap_or(movie.title),
            tagline: Some(changes.tagline.unwrap_or(movie.tagline)),
            description: Some(changes.description.unwrap_or(movie.description)),
            poster: changes.poster.unwrap_or(movie.poster),
            year: Some(changes.year.unwrap_or(movie.year)),
            country: Some(changes.country.unwrap_or(movie.country)),
            world_premiere: Some(changes.world_premiere.unwrap_or(movie.world_premiere)),
            budget: Some(changes.budget.unwrap_or(movie.budget)),
            fees_in_usa: Some(changes.fees_in_usa.unwrap_or(movie.fees_in_usa)),
            fees_in_world: Some(changes.fees_in_world.unwrap_or(movie.fees_in_world)),
            category_id: changes.category_id.unwrap_or(movie.category_id),
            url: changes.url.unwrap_or(movie.url),
            draft: Some(changes.draft.unwrap_or(movie.draft)),
            actors: changes.actors.unwrap_or(relations.actors),
            directors: changes.directors.unwrap_or(relations.directors),
            genres: changes.genres.unwrap_or(relations.genres),
        }
    }
}

/// Search and filter parameters for the movie list screen.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListParams {
    /// Matched against the title and the category name.
    pub q: Option<String>,
    pub category: Option<DbId>,
    pub year: Option<i16>,
    pub draft: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One row of a list-editable save.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftEdit {
    pub id: DbId,
    pub draft: bool,
}

/// A movie with its many-to-many links, as shown on the change screen.
#[derive(Debug, Clone, Serialize)]
pub struct MovieWithRelations {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(flatten)]
    pub relations: MovieRelations,
}
