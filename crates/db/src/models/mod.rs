//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `FromRow` list-row struct carrying display names for related records
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod actor;
pub mod category;
pub mod genre;
pub mod movie;
pub mod movie_shot;
pub mod rating;
pub mod review;
pub mod user;

/// Deserialize a nullable field of an update DTO as `Option<Option<T>>`.
///
/// Use with `#[serde(default)]`: an absent field stays `None` (keep the
/// stored value) while an explicit `null` becomes `Some(None)` (clear it).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
