//! Language domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ENGLISH_PLURAL_EQUATION, LANGUAGE_ENGLISH, LANGUAGE_TEMPLATES};
use crate::error::{DomainError, DomainResult};
use crate::plural::validate_plural_rule;

/// Language domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    pub code: String,
    pub fullname: String,
    /// Number of plural forms (0 = unknown)
    pub nplurals: u32,
    pub pluralequation: String,
    pub specialchars: Option<String>,
    pub directory_id: Uuid,
}

impl Language {
    /// Check if this is the pseudo-language of untranslated templates
    pub fn is_templates(&self) -> bool {
        self.code == LANGUAGE_TEMPLATES
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.fullname, self.code)
    }
}

/// Language to create, keyed by code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLanguage {
    pub code: String,
    pub fullname: String,
    pub nplurals: u32,
    pub pluralequation: String,
    pub specialchars: Option<String>,
}

impl NewLanguage {
    /// Build a language, checking its plural data.
    ///
    /// # Errors
    /// Returns a validation error for an empty code and a plural error for
    /// an inconsistent plural rule.
    pub fn new(
        code: impl Into<String>,
        fullname: impl Into<String>,
        nplurals: u32,
        pluralequation: impl Into<String>,
        specialchars: Option<String>,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() || code.contains('/') {
            return Err(DomainError::validation(format!(
                "Invalid language code '{}'",
                code
            )));
        }

        let pluralequation = pluralequation.into();
        validate_plural_rule(nplurals, &pluralequation)?;

        Ok(Self {
            code,
            fullname: fullname.into(),
            nplurals,
            pluralequation,
            specialchars: specialchars.filter(|s| !s.is_empty()),
        })
    }

    /// The templates pseudo-language
    pub fn templates() -> Self {
        Self {
            code: LANGUAGE_TEMPLATES.to_string(),
            fullname: "Templates".to_string(),
            nplurals: 0,
            pluralequation: String::new(),
            specialchars: None,
        }
    }

    /// English
    pub fn english() -> Self {
        Self {
            code: LANGUAGE_ENGLISH.to_string(),
            fullname: "English".to_string(),
            nplurals: 2,
            pluralequation: ENGLISH_PLURAL_EQUATION.to_string(),
            specialchars: None,
        }
    }
}
