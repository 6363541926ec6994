//! Directory-level permissions and the sets that grant them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{PERMISSION_APP_LABEL, PERMISSION_CONTENT_TYPE_NAME, PERMISSION_MODEL};

/// Kind of object a permission applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub id: Uuid,
    pub app_label: String,
    pub model: String,
    pub name: String,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Content type to create, keyed by (app_label, model)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentType {
    pub app_label: String,
    pub model: String,
    pub name: String,
}

impl NewContentType {
    /// Content type every directory-level permission is scoped to
    pub fn directory() -> Self {
        Self {
            app_label: PERMISSION_APP_LABEL.to_string(),
            model: PERMISSION_MODEL.to_string(),
            name: PERMISSION_CONTENT_TYPE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub content_type_id: Uuid,
    pub codename: String,
    pub name: String,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.codename, self.name)
    }
}

/// Permission to create, keyed by (content type, codename)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub content_type_id: Uuid,
    pub codename: String,
    pub name: String,
}

/// Permissions granted to a user over a directory subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub directory_id: Uuid,
    /// Codenames of the granted permissions, sorted
    pub positive_permissions: Vec<String>,
}

impl PermissionSet {
    pub fn grants(&self, codename: &str) -> bool {
        self.positive_permissions.iter().any(|p| p == codename)
    }
}

impl std::fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {} [{}]",
            self.user_id,
            self.directory_id,
            self.positive_permissions.join(", ")
        )
    }
}

/// Permission set to create, keyed by (user, directory).
///
/// The granted permissions only apply when the set is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermissionSet {
    pub user_id: Uuid,
    pub directory_id: Uuid,
    pub positive_permissions: Vec<Uuid>,
}
