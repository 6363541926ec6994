//! Project domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    CHECKSTYLE_STANDARD, CHECKSTYLE_TERMINOLOGY, DEFAULT_LOCAL_FILE_TYPE, DEFAULT_TREE_STYLE,
    PROJECT_TERMINOLOGY, PROJECT_TUTORIAL,
};

/// Project domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub code: String,
    pub fullname: String,
    pub source_language_id: Uuid,
    pub checkstyle: String,
    pub localfiletype: String,
    pub treestyle: String,
    pub directory_id: Uuid,
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fullname)
    }
}

/// Project to create, keyed by code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub code: String,
    pub fullname: String,
    pub source_language_id: Uuid,
    pub checkstyle: String,
    pub localfiletype: String,
    pub treestyle: String,
}

impl NewProject {
    /// Project used for terminology suggestions while translating
    pub fn terminology(source_language_id: Uuid) -> Self {
        Self {
            code: PROJECT_TERMINOLOGY.to_string(),
            fullname: "Terminology".to_string(),
            source_language_id,
            checkstyle: CHECKSTYLE_TERMINOLOGY.to_string(),
            localfiletype: DEFAULT_LOCAL_FILE_TYPE.to_string(),
            treestyle: DEFAULT_TREE_STYLE.to_string(),
        }
    }

    /// Demo project where new users can practise
    pub fn tutorial(source_language_id: Uuid) -> Self {
        Self {
            code: PROJECT_TUTORIAL.to_string(),
            fullname: "Tutorial".to_string(),
            source_language_id,
            checkstyle: CHECKSTYLE_STANDARD.to_string(),
            localfiletype: DEFAULT_LOCAL_FILE_TYPE.to_string(),
            treestyle: DEFAULT_TREE_STYLE.to_string(),
        }
    }
}
