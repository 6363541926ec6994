//! Domain-level constants.
//!
//! These constants name the fixed records every installation relies on.

// =============================================================================
// System Users
// =============================================================================

/// Stands in for any anonymous (not logged in) visitor
pub const USERNAME_NOBODY: &str = "nobody";

/// Stands in for any authenticated user
pub const USERNAME_DEFAULT: &str = "default";

/// Owner of changes made by bulk commands
pub const USERNAME_SYSTEM: &str = "system";

/// Prefix marking a credential that can never be verified
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

// =============================================================================
// Directory Tree
// =============================================================================

/// Path of the tree root
pub const ROOT_PATH: &str = "/";

/// Name of the directory holding all projects
pub const PROJECTS_DIRECTORY_NAME: &str = "projects";

// =============================================================================
// Languages
// =============================================================================

/// Pseudo-language holding untranslated template files
pub const LANGUAGE_TEMPLATES: &str = "templates";

/// English, the source language of the default projects
pub const LANGUAGE_ENGLISH: &str = "en";

/// Plural rule used by English and most Germanic languages
pub const ENGLISH_PLURAL_EQUATION: &str = "(n != 1)";

// =============================================================================
// Projects
// =============================================================================

/// Project used to display terminology suggestions while translating
pub const PROJECT_TERMINOLOGY: &str = "terminology";

/// Demo project for new users
pub const PROJECT_TUTORIAL: &str = "tutorial";

/// Default quality check profile
pub const CHECKSTYLE_STANDARD: &str = "standard";

/// Quality check profile for terminology projects
pub const CHECKSTYLE_TERMINOLOGY: &str = "terminology";

/// Default translation file format
pub const DEFAULT_LOCAL_FILE_TYPE: &str = "po";

/// Default project tree layout (detected from the files on disk)
pub const DEFAULT_TREE_STYLE: &str = "auto";

/// Prefix of the virtual path of project announcements
pub const PROJECT_ANNOUNCEMENT_PREFIX: &str = "announcements/projects/";

// =============================================================================
// Permissions
// =============================================================================

/// App label of the directory permission content type
pub const PERMISSION_APP_LABEL: &str = "pootle_app";

/// Model of the directory permission content type
pub const PERMISSION_MODEL: &str = "directory";

/// Display name of the directory permission content type
pub const PERMISSION_CONTENT_TYPE_NAME: &str = "pootle";

pub const PERMISSION_VIEW: &str = "view";
pub const PERMISSION_HIDE: &str = "hide";
pub const PERMISSION_SUGGEST: &str = "suggest";
pub const PERMISSION_TRANSLATE: &str = "translate";
pub const PERMISSION_REVIEW: &str = "review";
pub const PERMISSION_ADMINISTRATE: &str = "administrate";

/// Directory-level permissions as (codename, name) pairs
pub const DIRECTORY_PERMISSIONS: &[(&str, &str)] = &[
    (PERMISSION_VIEW, "Can access a project"),
    (PERMISSION_HIDE, "Cannot access a project"),
    (PERMISSION_SUGGEST, "Can make a suggestion for a translation"),
    (PERMISSION_TRANSLATE, "Can submit a translation"),
    (PERMISSION_REVIEW, "Can review suggestions"),
    (PERMISSION_ADMINISTRATE, "Can administrate a translation project"),
];

// =============================================================================
// Revision
// =============================================================================

/// Key of the global revision counter
pub const REVISION_KEY: &str = "pootle:revision";

// =============================================================================
// Plural Rules
// =============================================================================

/// Values of `n` checked when validating a plural rule
pub const PLURAL_CHECK_UPPER_BOUND: u64 = 1000;
