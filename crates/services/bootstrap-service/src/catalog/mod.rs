//! Language metadata catalogs.
//!
//! A catalog enumerates language codes and resolves each one to the data a
//! `Language` record needs. Resolution is per code so that one broken
//! entry never prevents importing the others.

mod builtin;
mod json;

use thiserror::Error;

use common::AppError;
use domain::{DomainError, NewLanguage};

pub use builtin::BuiltinCatalog;
pub use json::JsonCatalog;

/// Why a catalog entry could not be turned into a language.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    #[error("language '{code}' has no {field}")]
    MissingField { code: String, field: &'static str },

    #[error("language '{code}' is malformed: {reason}")]
    Malformed { code: String, reason: String },

    #[error("language '{code}' has invalid plural data: {source}")]
    InvalidPlural {
        code: String,
        #[source]
        source: DomainError,
    },

    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io(e) => AppError::Io(e),
            CatalogError::Json(e) => AppError::Json(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// Raw catalog data for one language. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMetadata {
    pub fullname: Option<String>,
    pub nplurals: Option<u32>,
    pub pluralequation: Option<String>,
    pub specialchars: Option<String>,
}

impl LanguageMetadata {
    /// Validate the metadata into a language to create.
    pub fn into_language(self, code: &str) -> Result<NewLanguage, CatalogError> {
        let missing = |field| CatalogError::MissingField {
            code: code.to_string(),
            field,
        };

        let fullname = self
            .fullname
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| missing("full name"))?;
        let nplurals = self.nplurals.ok_or_else(|| missing("plural count"))?;
        let pluralequation = self
            .pluralequation
            .ok_or_else(|| missing("plural expression"))?;

        NewLanguage::new(code, fullname, nplurals, pluralequation, self.specialchars).map_err(
            |source| match source {
                DomainError::Plural(_) => CatalogError::InvalidPlural {
                    code: code.to_string(),
                    source,
                },
                other => CatalogError::Malformed {
                    code: code.to_string(),
                    reason: other.to_string(),
                },
            },
        )
    }
}

/// Source of default language metadata.
pub trait LanguageCatalog: Send + Sync {
    /// All language codes, in import order
    fn codes(&self) -> Vec<String>;

    /// Raw metadata for one code
    fn lookup(&self, code: &str) -> Result<LanguageMetadata, CatalogError>;

    /// Metadata for one code, validated into a language to create
    fn resolve(&self, code: &str) -> Result<NewLanguage, CatalogError> {
        self.lookup(code)?.into_language(code)
    }
}
