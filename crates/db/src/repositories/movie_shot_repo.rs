//! Repository for the `movie_shots` table (movie stills).

use panda_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie_shot::{
    CreateMovieShot, MovieShot, MovieShotInlineRow, MovieShotListRow, UpdateMovieShot,
};
use crate::repositories::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, title, description, image, movie_id";

/// Provides CRUD and inline-editing operations for movie stills.
pub struct MovieShotRepo;

impl MovieShotRepo {
    pub async fn create(pool: &PgPool, input: &CreateMovieShot) -> Result<MovieShot, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_shots (title, description, image, movie_id)
             VALUES ($1, COALESCE($2, ''), $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieShot>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.movie_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_shots WHERE id = $1");
        sqlx::query_as::<_, MovieShot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stills with their movie titles, optionally for one movie.
    pub async fn list(
        pool: &PgPool,
        movie_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<MovieShotListRow>, sqlx::Error> {
        sqlx::query_as::<_, MovieShotListRow>(
            "SELECT s.id, s.title, s.image, s.movie_id, m.title AS movie
             FROM movie_shots s
             JOIN movies m ON m.id = s.movie_id
             WHERE ($1::BIGINT IS NULL OR s.movie_id = $1)
             ORDER BY s.id
             LIMIT $2 OFFSET $3",
        )
        .bind(movie_id)
        .bind(clamp_limit(limit))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool, movie_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM movie_shots WHERE ($1::BIGINT IS NULL OR movie_id = $1)",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await
    }

    /// All stills of one movie, in insertion order.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<MovieShot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_shots WHERE movie_id = $1 ORDER BY id");
        sqlx::query_as::<_, MovieShot>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovieShot,
    ) -> Result<Option<MovieShot>, sqlx::Error> {
        let query = format!(
            "UPDATE movie_shots SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                movie_id = COALESCE($5, movie_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieShot>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_shots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Save the stills inline editor of one movie in a single transaction.
    ///
    /// Existing rows are matched by `id` *and* `movie_id`, so a row belonging
    /// to another movie is never touched: updating or deleting one fails with
    /// `RowNotFound` and rolls the whole save back. Rows flagged `delete` are
    /// removed, rows without `id` are inserted. Returns the movie's stills
    /// afterwards.
    pub async fn save_inline(
        pool: &PgPool,
        movie_id: DbId,
        rows: &[MovieShotInlineRow],
    ) -> Result<Vec<MovieShot>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for row in rows {
            match (row.id, row.delete) {
                (Some(id), true) => {
                    let result =
                        sqlx::query("DELETE FROM movie_shots WHERE id = $1 AND movie_id = $2")
                            .bind(id)
                            .bind(movie_id)
                            .execute(&mut *tx)
                            .await?;
                    if result.rows_affected() == 0 {
                        return Err(sqlx::Error::RowNotFound);
                    }
                }
                (Some(id), false) => {
                    let result = sqlx::query(
                        "UPDATE movie_shots SET
                            title = COALESCE($3, title),
                            description = COALESCE($4, description),
                            image = COALESCE($5, image)
                         WHERE id = $1 AND movie_id = $2",
                    )
                    .bind(id)
                    .bind(movie_id)
                    .bind(&row.title)
                    .bind(&row.description)
                    .bind(&row.image)
                    .execute(&mut *tx)
                    .await?;
                    if result.rows_affected() == 0 {
                        return Err(sqlx::Error::RowNotFound);
                    }
                }
                (None, true) => {}
                (None, false) => {
                    sqlx::query(
                        "INSERT INTO movie_shots (title, description, image, movie_id)
                         VALUES ($1, COALESCE($2, ''), $3, $4)",
                    )
                    .bind(&row.title)
                    .bind(&row.description)
                    .bind(&row.image)
                    .bind(movie_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Self::list_for_movie(pool, movie_id).await
    }
}
