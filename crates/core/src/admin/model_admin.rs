//! Per-model admin screen configuration.
//!
//! A [`ModelAdmin`] declares how one entity appears in the admin panel: list
//! columns, filters, search, read-only fields, fieldsets, inline children and
//! bulk actions. Configuration is built with chained setters and checked once
//! at startup with [`ModelAdmin::validate`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::admin::actions::AdminAction;
use crate::error::CoreError;
use crate::permissions::has_all;
use crate::thumbnail::{render_media_thumbnail, ThumbnailSize};

/// Form control used to edit a field on the change screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    /// WYSIWYG editor; `uploads` enables inline image upload.
    RichText { uploads: bool },
}

/// A read-only column computed from an image field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageColumn {
    /// Column name as it appears in `list_display` / `readonly_fields`.
    pub name: &'static str,
    /// Column header.
    pub label: &'static str,
    /// Record field holding the stored media path.
    pub source: &'static str,
    pub size: ThumbnailSize,
}

impl ImageColumn {
    pub fn new(
        name: &'static str,
        label: &'static str,
        source: &'static str,
        size: ThumbnailSize,
    ) -> Self {
        Self {
            name,
            label,
            source,
            size,
        }
    }

    /// Render the thumbnail for `record`, reading the path from `self.source`.
    pub fn render(&self, record: &Map<String, Value>, media_prefix: &str) -> String {
        let path = record.get(self.source).and_then(Value::as_str);
        render_media_thumbnail(media_prefix, path, self.size)
    }
}

/// A titled group of form rows. Each row lists fields shown side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fieldset {
    pub name: Option<&'static str>,
    pub classes: Vec<&'static str>,
    pub rows: Vec<Vec<&'static str>>,
}

impl Fieldset {
    pub fn new(name: Option<&'static str>, rows: Vec<Vec<&'static str>>) -> Self {
        Self {
            name,
            classes: Vec::new(),
            rows,
        }
    }

    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.classes.push("collapse");
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Child records edited as a table on the parent's change screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAdmin {
    /// Registered model name of the child.
    pub model: &'static str,
    /// Foreign key on the child pointing at the parent.
    pub fk_field: &'static str,
    /// Number of blank rows offered for new children.
    pub extra: u32,
    pub readonly_fields: Vec<&'static str>,
    pub image_columns: Vec<ImageColumn>,
}

impl InlineAdmin {
    pub fn tabular(model: &'static str, fk_field: &'static str) -> Self {
        Self {
            model,
            fk_field,
            extra: 1,
            readonly_fields: Vec::new(),
            image_columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn extra(mut self, extra: u32) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn readonly_fields(mut self, fields: Vec<&'static str>) -> Self {
        self.readonly_fields = fields;
        self
    }

    #[must_use]
    pub fn image_column(mut self, column: ImageColumn) -> Self {
        self.image_columns.push(column);
        self
    }

    /// Serialize a child record with its computed image columns filled in.
    pub fn row(&self, record: &Value, media_prefix: &str) -> Map<String, Value> {
        let mut row = record.as_object().cloned().unwrap_or_default();
        for col in &self.image_columns {
            let html = col.render(&row, media_prefix);
            row.insert(col.name.to_string(), Value::String(html));
        }
        row
    }
}

/// Admin configuration for one registered model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    /// URL segment, e.g. `movies`.
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: Vec<&'static str>,
    pub list_display_links: Vec<&'static str>,
    pub list_filter: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub readonly_fields: Vec<&'static str>,
    pub list_editable: Vec<&'static str>,
    pub fieldsets: Vec<Fieldset>,
    pub inlines: Vec<InlineAdmin>,
    pub actions: Vec<AdminAction>,
    pub image_columns: Vec<ImageColumn>,
    pub widgets: BTreeMap<&'static str, Widget>,
    pub save_on_top: bool,
    pub save_as: bool,
}

impl ModelAdmin {
    /// A model shown with default settings (`id` column only).
    pub fn new(
        name: &'static str,
        verbose_name: &'static str,
        verbose_name_plural: &'static str,
    ) -> Self {
        Self {
            name,
            verbose_name,
            verbose_name_plural,
            list_display: vec!["id"],
            list_display_links: Vec::new(),
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            readonly_fields: Vec::new(),
            list_editable: Vec::new(),
            fieldsets: Vec::new(),
            inlines: Vec::new(),
            actions: Vec::new(),
            image_columns: Vec::new(),
            widgets: BTreeMap::new(),
            save_on_top: false,
            save_as: false,
        }
    }

    #[must_use]
    pub fn list_display(mut self, fields: Vec<&'static str>) -> Self {
        self.list_display = fields;
        self
    }

    #[must_use]
    pub fn list_display_links(mut self, fields: Vec<&'static str>) -> Self {
        self.list_display_links = fields;
        self
    }

    #[must_use]
    pub fn list_filter(mut self, fields: Vec<&'static str>) -> Self {
        self.list_filter = fields;
        self
    }

    #[must_use]
    pub fn search_fields(mut self, fields: Vec<&'static str>) -> Self {
        self.search_fields = fields;
        self
    }

    #[must_use]
    pub fn readonly_fields(mut self, fields: Vec<&'static str>) -> Self {
        self.readonly_fields = fields;
        self
    }

    #[must_use]
    pub fn list_editable(mut self, fields: Vec<&'static str>) -> Self {
        self.list_editable = fields;
        self
    }

    #[must_use]
    pub fn fieldsets(mut self, fieldsets: Vec<Fieldset>) -> Self {
        self.fieldsets = fieldsets;
        self
    }

    #[must_use]
    pub fn inline(mut self, inline: InlineAdmin) -> Self {
        self.inlines.push(inline);
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<AdminAction>) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn image_column(mut self, column: ImageColumn) -> Self {
        self.image_columns.push(column);
        self
    }

    #[must_use]
    pub fn widget(mut self, field: &'static str, widget: Widget) -> Self {
        self.widgets.insert(field, widget);
        self
    }

    #[must_use]
    pub fn save_on_top(mut self, value: bool) -> Self {
        self.save_on_top = value;
        self
    }

    #[must_use]
    pub fn save_as(mut self, value: bool) -> Self {
        self.save_as = value;
        self
    }

    pub fn is_readonly(&self, field: &str) -> bool {
        self.readonly_fields.contains(&field)
    }

    pub fn has_action(&self, action: AdminAction) -> bool {
        self.actions.contains(&action)
    }

    /// Actions the given role may run from the list screen.
    pub fn actions_for(&self, role: &str) -> Vec<AdminAction> {
        self.actions
            .iter()
            .copied()
            .filter(|a| has_all(role, a.allowed_permissions()))
            .collect()
    }

    fn find_image_column(&self, name: &str) -> Option<&ImageColumn> {
        self.image_columns.iter().find(|c| c.name == name)
    }

    /// Project a serialized record onto the list screen's columns.
    ///
    /// `id` is always included so rows can link to the change screen.
    /// Missing fields come out as `null`.
    pub fn list_row(&self, record: &Value, media_prefix: &str) -> Map<String, Value> {
        let empty = Map::new();
        let source = record.as_object().unwrap_or(&empty);
        let mut row = Map::new();
        row.insert(
            "id".to_string(),
            source.get("id").cloned().unwrap_or(Value::Null),
        );
        for &col in &self.list_display {
            let value = match self.find_image_column(col) {
                Some(image) => Value::String(image.render(source, media_prefix)),
                None => source.get(col).cloned().unwrap_or(Value::Null),
            };
            row.insert(col.to_string(), value);
        }
        row
    }

    /// Computed read-only values shown on the change screen.
    pub fn readonly_values(&self, record: &Value, media_prefix: &str) -> Map<String, Value> {
        let empty = Map::new();
        let source = record.as_object().unwrap_or(&empty);
        self.readonly_fields
            .iter()
            .filter_map(|&f| {
                self.find_image_column(f)
                    .map(|c| (f.to_string(), Value::String(c.render(source, media_prefix))))
            })
            .collect()
    }

    /// Strip read-only fields from an incoming form payload.
    pub fn strip_readonly(&self, payload: &mut Value) {
        if let Some(obj) = payload.as_object_mut() {
            for f in &self.readonly_fields {
                obj.remove(*f);
            }
        }
    }

    /// Check internal consistency of the configuration.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fail = |msg: String| Err(CoreError::Validation(format!("{}: {msg}", self.name)));

        for f in &self.list_display_links {
            if !self.list_display.contains(f) {
                return fail(format!("list_display_links field '{f}' is not in list_display"));
            }
        }
        for f in &self.list_editable {
            if !self.list_display.contains(f) {
                return fail(format!("list_editable field '{f}' is not in list_display"));
            }
            if self.list_display_links.contains(f) {
                return fail(format!("list_editable field '{f}' is also a display link"));
            }
            if self.is_readonly(f) {
                return fail(format!("list_editable field '{f}' is read-only"));
            }
            if self.list_display_links.is_empty() && self.list_display.first() == Some(f) {
                return fail(format!("list_editable field '{f}' is the implicit display link"));
            }
        }
        for f in &self.readonly_fields {
            if f.starts_with("get_") && self.find_image_column(f).is_none() {
                return fail(format!("read-only field '{f}' has no computed column"));
            }
        }
        for f in &self.list_display {
            if f.starts_with("get_") && self.find_image_column(f).is_none() {
                return fail(format!("list_display field '{f}' has no computed column"));
            }
        }
        for fs in &self.fieldsets {
            for f in fs.fields() {
                if f.starts_with("get_") && !self.is_readonly(f) {
                    return fail(format!("fieldset field '{f}' must be read-only"));
                }
            }
        }
        for inline in &self.inlines {
            for f in &inline.readonly_fields {
                if f.starts_with("get_") && !inline.image_columns.iter().any(|c| c.name == *f) {
                    return fail(format!(
                        "inline '{}' read-only field '{f}' has no computed column",
                        inline.model
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::permissions::{ROLE_EDITOR, ROLE_VIEWER};
    use crate::thumbnail::ACTOR;

    fn actor_admin() -> ModelAdmin {
        ModelAdmin::new("actors", "Актер", "Актеры")
            .list_display(vec!["name", "age", "image", "get_image"])
            .readonly_fields(vec!["get_image"])
            .image_column(ImageColumn::new("get_image", "Изображение", "image", ACTOR))
    }

    #[test]
    fn list_row_projects_columns_and_renders_images() {
        let record = json!({"id": 3, "name": "Keanu", "age": 58, "image": "actors/k.jpg", "description": "x"});
        let row = actor_admin().list_row(&record, "/media/");

        assert_eq!(row["id"], 3);
        assert_eq!(row["name"], "Keanu");
        assert_eq!(
            row["get_image"],
            r#"<img src="/media/actors/k.jpg" width="70" height="60">"#
        );
        assert!(!row.contains_key("description"));
    }

    #[test]
    fn list_row_fills_missing_with_null() {
        let row = actor_admin().list_row(&json!({"id": 1, "name": "A"}), "/media/");
        assert_eq!(row["age"], Value::Null);
        assert_eq!(row["get_image"], "");
    }

    #[test]
    fn readonly_values_only_include_computed() {
        let values = actor_admin().readonly_values(&json!({"id": 1, "image": "a.png"}), "/m");
        assert_eq!(values.len(), 1);
        assert!(values["get_image"].as_str().is_some_and(|s| s.contains("/m/a.png")));
    }

    #[test]
    fn strip_readonly_removes_fields() {
        let admin = ModelAdmin::new("reviews", "Отзыв", "Отзывы").readonly_fields(vec!["name", "email"]);
        let mut payload = json!({"name": "x", "email": "y", "text": "z"});
        admin.strip_readonly(&mut payload);
        assert_eq!(payload, json!({"text": "z"}));
    }

    #[test]
    fn actions_are_filtered_by_role() {
        let admin = ModelAdmin::new("movies", "Фильм", "Фильмы")
            .actions(vec![AdminAction::Publish, AdminAction::Unpublish]);
        assert_eq!(admin.actions_for(ROLE_EDITOR).len(), 2);
        assert!(admin.actions_for(ROLE_VIEWER).is_empty());
    }

    #[test]
    fn list_editable_must_be_displayed() {
        let admin = ModelAdmin::new("movies", "Фильм", "Фильмы")
            .list_display(vec!["title"])
            .list_editable(vec!["draft"]);
        assert_matches!(admin.validate(), Err(CoreError::Validation(msg)) if msg.contains("draft"));
    }

    #[test]
    fn list_editable_cannot_be_first_column_without_links() {
        let admin = ModelAdmin::new("movies", "Фильм", "Фильмы")
            .list_display(vec!["draft", "title"])
            .list_editable(vec!["draft"]);
        assert_matches!(admin.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn computed_field_needs_column() {
        let admin = ModelAdmin::new("stills", "Кадр", "Кадры")
            .list_display(vec!["title", "get_image"])
            .readonly_fields(vec!["get_image"]);
        assert_matches!(admin.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn inline_row_renders_images() {
        let inline = InlineAdmin::tabular("stills", "movie_id")
            .readonly_fields(vec!["get_image"])
            .image_column(ImageColumn::new(
                "get_image",
                "Кадр",
                "image",
                crate::thumbnail::STILL_INLINE,
            ));
        let row = inline.row(&json!({"id": 1, "image": "s.jpg"}), "/media/");
        assert_eq!(row["get_image"], r#"<img src="/media/s.jpg" width="110" height="100">"#);
        assert_eq!(row["image"], "s.jpg");
    }
}
