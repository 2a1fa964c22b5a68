//! Domain logic for the Panda Movies admin panel.
//!
//! Everything here is free of I/O: admin screen configuration, permission
//! checks, status-message pluralization, thumbnail rendering and slug
//! validation. The `db` and `api` crates build on these types.

pub mod admin;
pub mod error;
pub mod permissions;
pub mod slug;
pub mod status_message;
pub mod thumbnail;
pub mod types;
