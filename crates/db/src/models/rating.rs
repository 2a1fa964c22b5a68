//! Rating and rating-star entity models and DTOs.

use panda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rating_stars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingStar {
    pub id: DbId,
    pub value: i16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRatingStar {
    pub value: i16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRatingStar {
    pub value: Option<i16>,
}

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub ip: String,
    pub star_id: DbId,
    pub movie_id: DbId,
}

/// A rating as shown on the admin list screen: star value and movie title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingListRow {
    pub id: DbId,
    pub star: i16,
    pub movie_id: DbId,
    pub movie: String,
    pub ip: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub ip: String,
    pub star_id: DbId,
    pub movie_id: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRating {
    pub ip: Option<String>,
    pub star_id: Option<DbId>,
    pub movie_id: Option<DbId>,
}
