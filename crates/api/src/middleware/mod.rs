//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequirePermission`] -- Requires the caller's role to grant a permission.

pub mod auth;
pub mod rbac;
