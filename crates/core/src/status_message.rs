//! Status messages reported after a bulk update.
//!
//! The count is always the number of rows the update matched, not the number
//! whose value actually changed. The plural category is chosen by a
//! [`PluralRule`] so the wording follows the UI language.

use std::str::FromStr;

use serde::Serialize;

/// Grammatical plural category for a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    /// Exactly one.
    One,
    /// Russian "few" form: 2, 3 and 4.
    Few,
    /// Everything else, including zero.
    Many,
}

/// How counts map to plural forms for a UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluralRule {
    /// One / few (2..=4) / many. Used by the Russian admin UI.
    #[default]
    Slavic,
    /// One / other.
    English,
}

impl PluralRule {
    pub fn form(self, count: u64) -> PluralForm {
        match (self, count) {
            (_, 1) => PluralForm::One,
            (PluralRule::Slavic, 2..=4) => PluralForm::Few,
            _ => PluralForm::Many,
        }
    }

    /// Format the "N records were updated" message for `count` rows.
    pub fn updated_message(self, count: u64) -> String {
        match (self, self.form(count)) {
            (PluralRule::Slavic, PluralForm::One) => "1 запись была обновлена".to_string(),
            (PluralRule::Slavic, PluralForm::Few) => format!("{count} записи были обновлены"),
            (PluralRule::Slavic, PluralForm::Many) => format!("{count} записей были обновлены"),
            (PluralRule::English, PluralForm::One) => "1 record was updated".to_string(),
            (PluralRule::English, _) => format!("{count} records were updated"),
        }
    }
}

impl FromStr for PluralRule {
    type Err = String;

    /// Parse a locale tag such as `ru`, `ru-RU`, `en` or `en_US`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "ru" | "uk" | "be" => Ok(PluralRule::Slavic),
            "en" => Ok(PluralRule::English),
            _ => Err(format!("Unsupported message locale '{s}'")),
        }
    }
}

/// Severity of a message shown to an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient notification surfaced to the administrator who triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl StatusMessage {
    /// The message reported after a bulk update matched `count` rows.
    pub fn rows_updated(count: u64, rule: PluralRule) -> Self {
        Self {
            level: MessageLevel::Info,
            text: rule.updated_message(count),
        }
    }
}
