//! Roles and the capabilities they grant.
//!
//! Role names must match the `CHECK` constraint on `users.role` in
//! `20260301000002_create_users_table.sql`.

use std::fmt;

use serde::Serialize;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// A capability checked before an admin operation executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Add,
    Change,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::View,
        Permission::Add,
        Permission::Change,
        Permission::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Add => "add",
            Permission::Change => "change",
            Permission::Delete => "delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permissions granted to a role. Unknown roles get nothing.
pub fn role_permissions(role: &str) -> &'static [Permission] {
    match role {
        ROLE_ADMIN => &Permission::ALL,
        ROLE_EDITOR => &[Permission::View, Permission::Add, Permission::Change],
        ROLE_VIEWER => &[Permission::View],
        _ => &[],
    }
}

/// Whether `role` holds `permission`.
pub fn has_permission(role: &str, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

/// Whether `role` holds every permission in `required`.
pub fn has_all(role: &str, required: &[Permission]) -> bool {
    required.iter().all(|p| has_permission(role, *p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_everything() {
        for p in Permission::ALL {
            assert!(has_permission(ROLE_ADMIN, p));
        }
    }

    #[test]
    fn editor_cannot_delete() {
        assert!(has_permission(ROLE_EDITOR, Permission::Change));
        assert!(!has_permission(ROLE_EDITOR, Permission::Delete));
    }

    #[test]
    fn viewer_is_read_only() {
        assert!(has_permission(ROLE_VIEWER, Permission::View));
        assert!(!has_all(ROLE_VIEWER, &[Permission::View, Permission::Change]));
    }

    #[test]
    fn unknown_role_has_nothing() {
        assert!(role_permissions("intern").is_empty());
        assert!(!has_permission("intern", Permission::View));
    }

    #[test]
    fn empty_requirement_always_passes() {
        assert!(has_all("intern", &[]));
    }
}
