//! Directory tree nodes.
//!
//! Every node is addressed by its `pootle_path`: the root is `/` and a
//! child appends `<name>/` to its parent's path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ROOT_PATH;
use crate::error::{DomainError, DomainResult};

/// Directory domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub pootle_path: String,
}

impl Directory {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Path of a child of this directory called `name`
    pub fn child_path(&self, name: &str) -> String {
        format!("{}{}/", self.pootle_path, name)
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pootle_path)
    }
}

/// Directory to create, keyed by its derived path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDirectory {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub pootle_path: String,
}

impl NewDirectory {
    /// The tree root: empty name, no parent
    pub fn root() -> Self {
        Self {
            parent_id: None,
            name: String::new(),
            pootle_path: ROOT_PATH.to_string(),
        }
    }

    /// A named child of `parent`
    pub fn child_of(parent: &Directory, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('/') {
            return Err(DomainError::validation(format!(
                "Invalid directory name '{}' under {}",
                name, parent.pootle_path
            )));
        }

        Ok(Self {
            parent_id: Some(parent.id),
            pootle_path: parent.child_path(&name),
            name,
        })
    }
}
