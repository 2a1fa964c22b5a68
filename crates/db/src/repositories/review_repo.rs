//! Repository for the `reviews` table.

use panda_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{
    CreateReview, Review, ReviewInlineRow, ReviewListParams, ReviewListRow, UpdateReview,
};
use crate::repositories::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, email, name, text, parent_id, movie_id";

/// Provides CRUD and inline-editing operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (email, name, text, parent_id, movie_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.text)
            .bind(input.parent_id)
            .bind(input.movie_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews with parent author and movie title for the list screen.
    pub async fn list(
        pool: &PgPool,
        params: &ReviewListParams,
    ) -> Result<Vec<ReviewListRow>, sqlx::Error> {
        sqlx::query_as::<_, ReviewListRow>(
            "SELECT r.id, r.name, r.email, r.parent_id, p.name AS parent,
                    r.movie_id, m.title AS movie
             FROM reviews r
             JOIN movies m ON m.id = r.movie_id
             LEFT JOIN reviews p ON p.id = r.parent_id
             WHERE ($1::BIGINT IS NULL OR r.movie_id = $1)
             ORDER BY r.id
             LIMIT $2 OFFSET $3",
        )
        .bind(params.movie)
        .bind(clamp_limit(params.limit))
        .bind(clamp_offset(params.offset))
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool, params: &ReviewListParams) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews WHERE ($1::BIGINT IS NULL OR movie_id = $1)",
        )
        .bind(params.movie)
        .fetch_one(pool)
        .await
    }

    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE movie_id = $1 ORDER BY id");
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// Update the admin-editable fields of a review.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                text = COALESCE($2, text),
                parent_id = CASE WHEN $3 THEN $4 ELSE parent_id END,
                movie_id = COALESCE($5, movie_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Save the reviews inline editor of one movie in a single transaction.
    ///
    /// New rows get empty reviewer `name`/`email`; those fields are
    /// read-only in the admin.
    pub async fn save_inline(
        pool: &PgPool,
        movie_id: DbId,
        rows: &[ReviewInlineRow],
    ) -> Result<Vec<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for row in rows {
            match (row.id, row.delete) {
                (Some(id), true) => {
                    let result =
                        sqlx::query("DELETE FROM reviews WHERE id = $1 AND movie_id = $2")
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
                        "UPDATE reviews SET
                            text = COALESCE($3, text),
                            parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END
                         WHERE id = $1 AND movie_id = $2",
                    )
                    .bind(id)
                    .bind(movie_id)
                    .bind(&row.text)
                    .bind(row.parent_id.is_some())
                    .bind(row.parent_id.flatten())
                    .execute(&mut *tx)
                    .await?;
                    if result.rows_affected() == 0 {
                        return Err(sqlx::Error::RowNotFound);
                    }
                }
                (None, true) => {}
                (None, false) => {
                    sqlx::query(
                        "INSERT INTO reviews (email, name, text, parent_id, movie_id)
                         VALUES ('', '', $1, $2, $3)",
                    )
                    .bind(&row.text)
                    .bind(row.parent_id.flatten())
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
