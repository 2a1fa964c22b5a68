//! Registration of every catalog model with the Panda Movies admin site.

use crate::admin::actions::AdminAction;
use crate::admin::model_admin::{Fieldset, ImageColumn, InlineAdmin, ModelAdmin, Widget};
use crate::admin::site::AdminSite;
use crate::error::CoreError;
use crate::thumbnail::{ACTOR, POSTER, STILL_INLINE, STILL_LIST};

pub const SITE_TITLE: &str = "Panda Movies";
pub const SITE_HEADER: &str = "Panda Movies";

pub const CATEGORIES: &str = "categories";
pub const GENRES: &str = "genres";
pub const ACTORS: &str = "actors";
pub const MOVIES: &str = "movies";
pub const STILLS: &str = "stills";
pub const REVIEWS: &str = "reviews";
pub const RATINGS: &str = "ratings";
pub const RATING_STARS: &str = "rating-stars";

pub fn category_admin() -> ModelAdmin {
    ModelAdmin::new(CATEGORIES, "Категория", "Категории")
        .list_display(vec!["id", "name", "url"])
        .list_display_links(vec!["name"])
}

pub fn movie_admin() -> ModelAdmin {
    ModelAdmin::new(MOVIES, "Фильм", "Фильмы")
        .list_display(vec!["title", "category", "url", "draft"])
        .list_filter(vec!["category", "year"])
        .search_fields(vec!["title", "category__name"])
        .inline(
            InlineAdmin::tabular(STILLS, "movie_id")
                .extra(1)
                .readonly_fields(vec!["get_image"])
                .image_column(ImageColumn::new("get_image", "Кадр", "image", STILL_INLINE)),
        )
        .inline(
            InlineAdmin::tabular(REVIEWS, "movie_id")
                .extra(1)
                .readonly_fields(vec!["name", "email"]),
        )
        .save_on_top(true)
        .save_as(true)
        .list_editable(vec!["draft"])
        .actions(vec![AdminAction::Publish, AdminAction::Unpublish])
        .widget("description", Widget::RichText { uploads: true })
        .readonly_fields(vec!["get_image"])
        .image_column(ImageColumn::new("get_image", "Постер", "poster", POSTER))
        .fieldsets(vec![
            Fieldset::new(None, vec![vec!["title", "tagline"]]),
            Fieldset::new(None, vec![vec!["description"], vec!["poster", "get_image"]]),
            Fieldset::new(None, vec![vec!["year", "world_premiere", "country"]]),
            Fieldset::new(
                Some("Actors"),
                vec![vec!["actors", "directors", "genres", "category"]],
            )
            .collapsed(),
            Fieldset::new(None, vec![vec!["budget", "fees_in_usa", "fees_in_world"]]),
            Fieldset::new(Some("Options"), vec![vec!["url", "draft"]]),
        ])
}

pub fn review_admin() -> ModelAdmin {
    ModelAdmin::new(REVIEWS, "Отзыв", "Отзывы")
        .list_display(vec!["id", "name", "email", "parent", "movie"])
        .list_display_links(vec!["name"])
        .readonly_fields(vec!["name", "email"])
}

pub fn genre_admin() -> ModelAdmin {
    ModelAdmin::new(GENRES, "Жанр", "Жанры").list_display(vec!["name", "url"])
}

pub fn actor_admin() -> ModelAdmin {
    ModelAdmin::new(ACTORS, "Актеры и режиссеры", "Актеры и режиссеры")
        .list_display(vec!["name", "age", "image", "get_image"])
        .readonly_fields(vec!["get_image"])
        .image_column(ImageColumn::new("get_image", "Изображение", "image", ACTOR))
}

pub fn rating_admin() -> ModelAdmin {
    ModelAdmin::new(RATINGS, "Рейтинг", "Рейтинги").list_display(vec!["star", "movie", "ip"])
}

pub fn still_admin() -> ModelAdmin {
    ModelAdmin::new(STILLS, "Кадр из фильма", "Кадры из фильма")
        .list_display(vec!["title", "movie", "get_image"])
        .readonly_fields(vec!["get_image"])
        .image_column(ImageColumn::new("get_image", "Изображение", "image", STILL_LIST))
}

pub fn rating_star_admin() -> ModelAdmin {
    ModelAdmin::new(RATING_STARS, "Звезда рейтинга", "Звезды рейтинга")
        .list_display(vec!["id", "value"])
}

/// Build and validate the complete admin site.
pub fn build_site() -> Result<AdminSite, CoreError> {
    let mut site = AdminSite::new(SITE_TITLE, SITE_HEADER);
    site.register(category_admin())?;
    site.register(movie_admin())?;
    site.register(review_admin())?;
    site.register(genre_admin())?;
    site.register(actor_admin())?;
    site.register(rating_admin())?;
    site.register(still_admin())?;
    site.register(rating_star_admin())?;
    site.validate()?;
    Ok(site)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn site_builds() {
        let site = build_site().expect("site configuration is valid");
        assert_eq!(site.models().len(), 8);
        assert_eq!(site.site_title, "Panda Movies");
    }

    #[test]
    fn movie_list_row_matches_columns() {
        let record = json!({
            "id": 1, "title": "Матрица", "category": "Фильмы", "url": "matrix",
            "draft": false, "poster": "posters/m.jpg", "year": 1999
        });
        let row = movie_admin().list_row(&record, "/media/");
        let keys: Vec<_> = row.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains(&"draft"));
        assert!(!keys.contains(&"year"));
    }

    #[test]
    fn movie_change_screen_renders_poster() {
        let values = movie_admin().readonly_values(&json!({"poster": "posters/m.jpg"}), "/media/");
        assert_eq!(
            values["get_image"],
            r#"<img src="/media/posters/m.jpg" width="105" height="100">"#
        );
    }

    #[test]
    fn description_uses_rich_text() {
        assert_eq!(
            movie_admin().widgets.get("description"),
            Some(&Widget::RichText { uploads: true })
        );
    }

    #[test]
    fn review_contact_fields_are_read_only() {
        let admin = review_admin();
        assert!(admin.is_readonly("name"));
        assert!(admin.is_readonly("email"));
        assert!(!admin.is_readonly("text"));
    }

    #[test]
    fn only_movies_have_actions() {
        let site = build_site().unwrap();
        for m in site.models() {
            assert_eq!(!m.actions.is_empty(), m.name == MOVIES, "{}", m.name);
        }
    }
}
