//! Repository for the `rating_stars` table.

use panda_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRatingStar, RatingStar, UpdateRatingStar};

pub struct RatingStarRepo;

impl RatingStarRepo {
    pub async fn create(pool: &PgPool, input: &CreateRatingStar) -> Result<RatingStar, sqlx::Error> {
        sqlx::query_as::<_, RatingStar>(
            "INSERT INTO rating_stars (value) VALUES ($1) RETURNING id, value",
        )
        .bind(input.value)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RatingStar>, sqlx::Error> {
        sqlx::query_as::<_, RatingStar>("SELECT id, value FROM rating_stars WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All stars, highest value first. The table holds a handful of rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<RatingStar>, sqlx::Error> {
        sqlx::query_as::<_, RatingStar>("SELECT id, value FROM rating_stars ORDER BY value DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRatingStar,
    ) -> Result<Option<RatingStar>, sqlx::Error> {
        sqlx::query_as::<_, RatingStar>(
            "UPDATE rating_stars SET value = COALESCE($2, value) WHERE id = $1 RETURNING id, value",
        )
        .bind(id)
        .bind(input.value)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rating_stars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
