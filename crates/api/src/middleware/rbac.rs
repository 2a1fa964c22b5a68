//! Permission-based access control extractors.
//!
//! [`RequirePermission`] wraps [`AuthUser`] and rejects requests whose role
//! does not grant the permission named by its marker type. The aliases
//! [`RequireView`], [`RequireAdd`], [`RequireChange`] and [`RequireDelete`]
//! cover the four admin permissions.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use panda_core::error::CoreError;
use panda_core::permissions::{has_permission, Permission};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Type-level name for a [`Permission`].
pub trait PermissionMarker {
    const PERMISSION: Permission;
}

pub struct CanView;
pub struct CanAdd;
pub struct CanChange;
pub struct CanDelete;

impl PermissionMarker for CanView {
    const PERMISSION: Permission = Permission::View;
}

impl PermissionMarker for CanAdd {
    const PERMISSION: Permission = Permission::Add;
}

impl PermissionMarker for CanChange {
    const PERMISSION: Permission = Permission::Change;
}

impl PermissionMarker for CanDelete {
    const PERMISSION: Permission = Permission::Delete;
}

/// Requires the caller's role to grant `P::PERMISSION`. Rejects with 403
/// Forbidden otherwise.
///
/// ```ignore
/// async fn delete_movie(RequirePermission(user, _): RequireDelete) -> AppResult<StatusCode> {
///     // user may delete here
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequirePermission<P>(pub AuthUser, pub PhantomData<P>);

pub type RequireView = RequirePermission<CanView>;
pub type RequireAdd = RequirePermission<CanAdd>;
pub type RequireChange = RequirePermission<CanChange>;
pub type RequireDelete = RequirePermission<CanDelete>;

impl<P> FromRequestParts<AppState> for RequirePermission<P>
where
    P: PermissionMarker + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !has_permission(&user.role, P::PERMISSION) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Permission '{}' required",
                P::PERMISSION
            ))));
        }
        Ok(RequirePermission(user, PhantomData))
    }
}
