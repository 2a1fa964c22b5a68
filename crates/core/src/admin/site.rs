//! The admin site: a titled collection of registered models.

use serde::Serialize;

use crate::admin::model_admin::ModelAdmin;
use crate::error::CoreError;

#[derive(Debug, Clone, Serialize)]
pub struct AdminSite {
    pub site_title: &'static str,
    pub site_header: &'static str,
    models: Vec<ModelAdmin>,
}

/// One entry in the site index.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
}

impl AdminSite {
    pub fn new(site_title: &'static str, site_header: &'static str) -> Self {
        Self {
            site_title,
            site_header,
            models: Vec::new(),
        }
    }

    /// Register a model. Registering the same name twice is a conflict.
    pub fn register(&mut self, admin: ModelAdmin) -> Result<(), CoreError> {
        if self.get(admin.name).is_some() {
            return Err(CoreError::Conflict(format!(
                "Model '{}' is already registered",
                admin.name
            )));
        }
        admin.validate()?;
        self.models.push(admin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn models(&self) -> &[ModelAdmin] {
        &self.models
    }

    pub fn index(&self) -> Vec<ModelEntry> {
        self.models
            .iter()
            .map(|m| ModelEntry {
                name: m.name,
                verbose_name: m.verbose_name,
                verbose_name_plural: m.verbose_name_plural,
            })
            .collect()
    }

    /// Check that every inline points at a registered model.
    pub fn validate(&self) -> Result<(), CoreError> {
        for model in &self.models {
            for inline in &model.inlines {
                if self.get(inline.model).is_none() {
                    return Err(CoreError::Validation(format!(
                        "{}: inline model '{}' is not registered",
                        model.name, inline.model
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::admin::model_admin::InlineAdmin;

    #[test]
    fn duplicate_registration_conflicts() {
        let mut site = AdminSite::new("t", "h");
        site.register(ModelAdmin::new("genres", "Жанр", "Жанры")).unwrap();
        assert_matches!(
            site.register(ModelAdmin::new("genres", "Жанр", "Жанры")),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn inline_must_be_registered() {
        let mut site = AdminSite::new("t", "h");
        site.register(
            ModelAdmin::new("movies", "Фильм", "Фильмы")
                .inline(InlineAdmin::tabular("reviews", "movie_id")),
        )
        .unwrap();
        assert_matches!(site.validate(), Err(CoreError::Validation(_)));

        site.register(ModelAdmin::new("reviews", "Отзыв", "Отзывы")).unwrap();
        assert!(site.validate().is_ok());
    }

    #[test]
    fn index_lists_models_in_registration_order() {
        let mut site = AdminSite::new("t", "h");
        site.register(ModelAdmin::new("a", "A", "As")).unwrap();
        site.register(ModelAdmin::new("b", "B", "Bs")).unwrap();
        let names: Vec<_> = site.index().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
