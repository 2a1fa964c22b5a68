//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod actor_repo;
pub mod category_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod movie_shot_repo;
pub mod rating_repo;
pub mod rating_star_repo;
pub mod review_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use category_repo::CategoryRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use movie_shot_repo::MovieShotRepo;
pub use rating_repo::RatingRepo;
pub use rating_star_repo::RatingStarRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;

/// Default page size for admin list screens.
pub const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for admin list screens.
pub const MAX_LIMIT: i64 = 500;

pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Build an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// in the term matched literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIMIT);
        assert_eq!(clamp_offset(Some(-5)), 0);
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("матр"), "%матр%");
    }
}
