//! Repository for the `ratings` table.

use panda_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating, RatingListRow, UpdateRating};
use crate::repositories::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, ip, star_id, movie_id";

pub struct RatingRepo;

impl RatingRepo {
    pub async fn create(pool: &PgPool, input: &CreateRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (ip, star_id, movie_id) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(&input.ip)
            .bind(input.star_id)
            .bind(input.movie_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List ratings with star value and movie title for the list screen.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<RatingListRow>, sqlx::Error> {
        sqlx::query_as::<_, RatingListRow>(
            "SELECT r.id, s.value AS star, r.movie_id, m.title AS movie, r.ip
             FROM ratings r
             JOIN rating_stars s ON s.id = r.star_id
             JOIN movies m ON m.id = r.movie_id
             ORDER BY r.id
             LIMIT $1 OFFSET $2",
        )
        .bind(clamp_limit(limit))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRating,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET
                ip = COALESCE($2, ip),
                star_id = COALESCE($3, star_id),
                movie_id = COALESCE($4, movie_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .bind(&input.ip)
            .bind(input.star_id)
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
