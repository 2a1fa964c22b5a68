//! Repository for the `movies` table and its many-to-many links.

use panda_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::movie::{
    CreateMovie, DraftEdit, Movie, MovieListParams, MovieListRow, MovieRelations, UpdateMovie,
};
use crate::repositories::{clamp_limit, clamp_offset, contains_pattern};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, tagline, description, poster, year, country, world_premiere, \
     budget, fees_in_usa, fees_in_world, category_id, url, draft, created_at, updated_at";

/// Shared `WHERE` clause for list and count: `$1` search pattern, `$2`
/// category, `$3` year, `$4` draft.
const LIST_FILTER: &str = "($1::TEXT IS NULL OR m.title ILIKE $1 OR c.name ILIKE $1)
       AND ($2::BIGINT IS NULL OR m.category_id = $2)
       AND ($3::SMALLINT IS NULL OR m.year = $3)
       AND ($4::BOOLEAN IS NULL OR m.draft = $4)";

/// Provides CRUD, search and bulk operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie together with its actor, director and genre links.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movies
                (title, tagline, description, poster, year, country, world_premiere,
                 budget, fees_in_usa, fees_in_world, category_id, url, draft)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, COALESCE($5, 2019),
                     COALESCE($6, ''), COALESCE($7, CURRENT_DATE), COALESCE($8, 0),
                     COALESCE($9, 0), COALESCE($10, 0), $11, $12, COALESCE($13, false))
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(&input.poster)
            .bind(input.year)
            .bind(&input.country)
            .bind(input.world_premiere)
            .bind(input.budget)
            .bind(input.fees_in_usa)
            .bind(input.fees_in_world)
            .bind(input.category_id)
            .bind(&input.url)
            .bind(input.draft)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_links_inner(&mut tx, LinkTable::Actors, movie.id, &input.actors).await?;
        Self::set_links_inner(&mut tx, LinkTable::Directors, movie.id, &input.directors).await?;
        Self::set_links_inner(&mut tx, LinkTable::Genres, movie.id, &input.genres).await?;

        tx.commit().await?;
        Ok(movie)
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the actor, director and genre ids linked to a movie.
    pub async fn relations(pool: &PgPool, id: DbId) -> Result<MovieRelations, sqlx::Error> {
        let actors = Self::link_ids(pool, LinkTable::Actors, id).await?;
        let directors = Self::link_ids(pool, LinkTable::Directors, id).await?;
        let genres = Self::link_ids(pool, LinkTable::Genres, id).await?;
        Ok(MovieRelations {
            actors,
            directors,
            genres,
        })
    }

    /// List movies for the admin list screen with search and filters applied.
    pub async fn list(
        pool: &PgPool,
        params: &MovieListParams,
    ) -> Result<Vec<MovieListRow>, sqlx::Error> {
        let pattern = params.q.as_deref().map(contains_pattern);
        let query = format!(
            "SELECT m.id, m.title, m.category_id, c.name AS category, m.url, m.draft,
                    m.year, m.poster
             FROM movies m
             LEFT JOIN categories c ON c.id = m.category_id
             WHERE {LIST_FILTER}
             ORDER BY m.id
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, MovieListRow>(&query)
            .bind(pattern)
            .bind(params.category)
            .bind(params.year)
            .bind(params.draft)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Count movies matching the same search and filters as [`Self::list`].
    pub async fn count(pool: &PgPool, params: &MovieListParams) -> Result<i64, sqlx::Error> {
        let pattern = params.q.as_deref().map(contains_pattern);
        let query = format!(
            "SELECT COUNT(*)
             FROM movies m
             LEFT JOIN categories c ON c.id = m.category_id
             WHERE {LIST_FILTER}"
        );
        sqlx::query_scalar(&query)
            .bind(pattern)
            .bind(params.category)
            .bind(params.year)
            .bind(params.draft)
            .fetch_one(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied; relation
    /// lists that are present replace the existing links. `poster` and
    /// `category_id` are set from the inner value when present, so
    /// `Some(None)` clears them.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                tagline = COALESCE($3, tagline),
                description = COALESCE($4, description),
                poster = CASE WHEN $5 THEN $6 ELSE poster END,
                year = COALESCE($7, year),
                country = COALESCE($8, country),
                world_premiere = COALESCE($9, world_premiere),
                budget = COALESCE($10, budget),
                fees_in_usa = COALESCE($11, fees_in_usa),
                fees_in_world = COALESCE($12, fees_in_world),
                category_id = CASE WHEN $13 THEN $14 ELSE category_id END,
                url = COALESCE($15, url),
                draft = COALESCE($16, draft),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(input.poster.is_some())
            .bind(input.poster.as_ref().and_then(|p| p.as_deref()))
            .bind(input.year)
            .bind(&input.country)
            .bind(input.world_premiere)
            .bind(input.budget)
            .bind(input.fees_in_usa)
            .bind(input.fees_in_world)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(&input.url)
            .bind(input.draft)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(movie) = movie else {
            return Ok(None);
        };

        if let Some(actors) = &input.actors {
            Self::set_links_inner(&mut tx, LinkTable::Actors, id, actors).await?;
        }
        if let Some(directors) = &input.directors {
            Self::set_links_inner(&mut tx, LinkTable::Directors, id, directors).await?;
        }
        if let Some(genres) = &input.genres {
            Self::set_links_inner(&mut tx, LinkTable::Genres, id, genres).await?;
        }

        tx.commit().await?;
        Ok(Some(movie))
    }

    /// Copy an existing movie with `changes` applied, as a new row.
    ///
    /// Returns `None` if the source movie does not exist.
    pub async fn save_as_new(
        pool: &PgPool,
        id: DbId,
        changes: UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let Some(source) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let relations = Self::relations(pool, id).await?;
        let input = CreateMovie::from_existing(source, relations, changes);
        Self::create(pool, &input).await.map(Some)
    }

    /// Permanently delete a movie. Stills, reviews, ratings and links cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `draft` on every movie in `ids` with a single statement.
    ///
    /// Returns the number of rows matched. The value is written
    /// unconditionally, so rows that already held it still count.
    pub async fn set_draft(pool: &PgPool, ids: &[DbId], draft: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET draft = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(draft)
        .execute(pool)
        .await?;

        tracing::debug!(
            selected = ids.len(),
            matched = result.rows_affected(),
            draft,
            "Movie draft flag updated"
        );
        Ok(result.rows_affected())
    }

    /// Apply per-row draft values from the list-editable column in one
    /// transaction. Returns the number of rows matched.
    pub async fn save_draft_edits(pool: &PgPool, edits: &[DraftEdit]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut matched = 0;
        for edit in edits {
            let result = sqlx::query(
                "UPDATE movies SET draft = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(edit.id)
            .bind(edit.draft)
            .execute(&mut *tx)
            .await?;
            matched += result.rows_affected();
        }
        tx.commit().await?;
        Ok(matched)
    }

    async fn link_ids(pool: &PgPool, table: LinkTable, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT {col} FROM {tbl} WHERE movie_id = $1 ORDER BY {col}",
            col = table.column(),
            tbl = table.table(),
        );
        sqlx::query_scalar(&query).bind(id).fetch_all(pool).await
    }

    async fn set_links_inner(
        tx: &mut Transaction<'_, Postgres>,
        table: LinkTable,
        movie_id: DbId,
        ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let delete = format!("DELETE FROM {} WHERE movie_id = $1", table.table());
        sqlx::query(&delete)
            .bind(movie_id)
            .execute(&mut **tx)
            .await?;

        if ids.is_empty() {
            return Ok(());
        }

        let insert = format!(
            "INSERT INTO {tbl} (movie_id, {col})
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
            tbl = table.table(),
            col = table.column(),
        );
        sqlx::query(&insert)
            .bind(movie_id)
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

/// The three many-to-many join tables hanging off `movies`.
#[derive(Debug, Clone, Copy)]
enum LinkTable {
    Actors,
    Directors,
    Genres,
}

impl LinkTable {
    fn table(self) -> &'static str {
        match self {
            LinkTable::Actors => "movie_actors",
            LinkTable::Directors => "movie_directors",
            LinkTable::Genres => "movie_genres",
        }
    }

    fn column(self) -> &'static str {
        match self {
            LinkTable::Actors | LinkTable::Directors => "actor_id",
            LinkTable::Genres => "genre_id",
        }
    }
}
