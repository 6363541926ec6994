//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod content_type;
pub mod directory;
pub mod language;
pub mod permission;
pub mod permission_set;
pub mod permission_set_grant;
pub mod project;
pub mod revision;
pub mod static_page;
pub mod user;
