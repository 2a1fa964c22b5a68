//! Actor (and director) entity model and DTOs.

use panda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `actors` table. Directors are actors too.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub age: i16,
    pub description: String,
    /// Stored media path, e.g. `actors/keanu.jpg`.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub age: Option<i16>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// `image` is cleared by an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActor {
    pub name: Option<String>,
    pub age: Option<i16>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub image: Option<Option<String>>,
}
