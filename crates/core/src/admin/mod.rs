//! Admin panel configuration.
//!
//! - [`model_admin`] -- per-model list/change screen settings.
//! - [`actions`] -- bulk actions and the permissions they need.
//! - [`site`] -- the registry of configured models.
//! - [`registry`] -- the catalog's concrete registrations.

pub mod actions;
pub mod model_admin;
pub mod registry;
pub mod site;

pub use actions::AdminAction;
pub use model_admin::{Fieldset, ImageColumn, InlineAdmin, ModelAdmin, Widget};
pub use site::AdminSite;
