use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{CatalogError, LanguageCatalog, LanguageMetadata};

/// One entry of a JSON catalog file.
///
/// ```json
/// { "de": { "name": "German", "nplurals": 2, "plural": "(n != 1)", "specialchars": "äöüß" } }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    name: Option<String>,
    nplurals: Option<u32>,
    plural: Option<String>,
    specialchars: Option<String>,
}

/// Catalog read from a JSON object keyed by language code.
///
/// Entries are kept as raw JSON and checked one at a time on lookup.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    entries: BTreeMap<String, Value>,
}

impl JsonCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let entries = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LanguageCatalog for JsonCatalog {
    fn codes(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn lookup(&self, code: &str) -> Result<LanguageMetadata, CatalogError> {
        let value = self
            .entries
            .get(code)
            .ok_or_else(|| CatalogError::UnknownLanguage(code.to_string()))?;

        let entry = Entry::deserialize(value).map_err(|e| CatalogError::Malformed {
            code: code.to_string(),
            reason: e.to_string(),
        })?;

        Ok(LanguageMetadata {
            fullname: entry.name,
            nplurals: entry.nplurals,
            pluralequation: entry.plural,
            specialchars: entry.specialchars,
        })
    }
}
