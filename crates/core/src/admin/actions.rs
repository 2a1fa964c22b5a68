//! Bulk actions offered on list screens.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::permissions::Permission;

/// A bulk action applied to the records selected on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Clear the draft flag so movies appear in public listings.
    Publish,
    /// Set the draft flag, hiding movies from public listings.
    Unpublish,
}

impl AdminAction {
    pub fn name(self) -> &'static str {
        match self {
            AdminAction::Publish => "publish",
            AdminAction::Unpublish => "unpublish",
        }
    }

    /// Label shown in the action dropdown.
    pub fn description(self) -> &'static str {
        match self {
            AdminAction::Publish => "Опубликовать",
            AdminAction::Unpublish => "Снять с публикации",
        }
    }

    /// Value written to `movies.draft` by this action.
    pub fn draft_value(self) -> bool {
        match self {
            AdminAction::Publish => false,
            AdminAction::Unpublish => true,
        }
    }

    /// Permissions the caller must hold to run the action.
    pub fn allowed_permissions(self) -> &'static [Permission] {
        match self {
            AdminAction::Publish | AdminAction::Unpublish => &[Permission::Change],
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdminAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publish" => Ok(AdminAction::Publish),
            "unpublish" => Ok(AdminAction::Unpublish),
            other => Err(CoreError::Validation(format!("Unknown action '{other}'"))),
        }
    }
}

/// Action metadata as shown to a client.
#[derive(Debug, Clone, Serialize)]
pub struct ActionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub allowed_permissions: &'static [Permission],
}

impl From<AdminAction> for ActionInfo {
    fn from(action: AdminAction) -> Self {
        Self {
            name: action.name(),
            description: action.description(),
            allowed_permissions: action.allowed_permissions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn publish_clears_draft() {
        assert!(!AdminAction::Publish.draft_value());
        assert!(AdminAction::Unpublish.draft_value());
    }

    #[test]
    fn both_actions_require_change() {
        assert_eq!(AdminAction::Publish.allowed_permissions(), &[Permission::Change]);
        assert_eq!(AdminAction::Unpublish.allowed_permissions(), &[Permission::Change]);
    }

    #[test]
    fn parse_by_name() {
        assert_eq!("publish".parse::<AdminAction>().ok(), Some(AdminAction::Publish));
        assert_eq!("unpublish".parse::<AdminAction>().ok(), Some(AdminAction::Unpublish));
        assert_matches!("delete_all".parse::<AdminAction>(), Err(CoreError::Validation(_)));
    }
}
