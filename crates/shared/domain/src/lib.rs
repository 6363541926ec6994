//! Domain layer - Core records of a translation server installation.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the records the bootstrap creates, their fixed default values, and the
//! plural rule parser used to check language metadata.

pub mod announcement;
pub mod constants;
pub mod directory;
pub mod ensured;
pub mod error;
pub mod language;
pub mod password;
pub mod permission;
pub mod plural;
pub mod project;
pub mod user;

pub use announcement::{Announcement, NewAnnouncement};
pub use constants::*;
pub use directory::{Directory, NewDirectory};
pub use ensured::{Ensured, Revision};
pub use error::{DomainError, DomainResult};
pub use language::{Language, NewLanguage};
pub use password::Password;
pub use permission::{
    ContentType, NewContentType, NewPermission, NewPermissionSet, Permission, PermissionSet,
};
pub use plural::{validate_plural_rule, PluralExpression};
pub use project::{NewProject, Project};
pub use user::{NewUser, User};
