//! Catalog compiled into the binary, covering the commonly hosted languages.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::{CatalogError, LanguageCatalog, LanguageMetadata};

const SLAVIC_3: &str =
    "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)";

/// (code, name, nplurals, plural expression, special characters)
const LANGUAGES: &[(&str, &str, u32, &str, &str)] = &[
    ("af", "Afrikaans", 2, "(n != 1)", "ëïêôûáéíóúý"),
    ("ak", "Akan", 2, "(n > 1)", "ɛɔƐƆ"),
    ("am", "Amharic", 2, "(n > 1)", ""),
    ("an", "Aragonese", 2, "(n != 1)", ""),
    ("ar", "Arabic", 6, "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5", "،؛؟٫٬"),
    ("ast", "Asturian", 2, "(n != 1)", ""),
    ("az", "Azerbaijani", 2, "(n != 1)", "ƏəĞğİıÖöŞşÜüÇç"),
    ("be", "Belarusian", 3, SLAVIC_3, ""),
    ("bg", "Bulgarian", 2, "(n != 1)", ""),
    ("bn", "Bengali", 2, "(n != 1)", ""),
    ("br", "Breton", 2, "(n > 1)", ""),
    ("bs", "Bosnian", 3, SLAVIC_3, ""),
    ("ca", "Catalan; Valencian", 2, "(n != 1)", "·"),
    ("cs", "Czech", 3, "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2", ""),
    ("cy", "Welsh", 4, "(n==1) ? 0 : (n==2) ? 1 : (n != 8 && n != 11) ? 2 : 3", "âêîôûŵŷ"),
    ("da", "Danish", 2, "(n != 1)", ""),
    ("de", "German", 2, "(n != 1)", "äöüß"),
    ("el", "Greek, Modern (1453-)", 2, "(n != 1)", ""),
    ("en", "English", 2, "(n != 1)", ""),
    ("en_GB", "English (United Kingdom)", 2, "(n != 1)", ""),
    ("eo", "Esperanto", 2, "(n != 1)", "ĉĝĥĵŝŭ"),
    ("es", "Spanish; Castilian", 2, "(n != 1)", "¡¿ñ"),
    ("et", "Estonian", 2, "(n != 1)", "šžõäöü"),
    ("eu", "Basque", 2, "(n != 1)", ""),
    ("fa", "Persian", 1, "0", "،؛؟"),
    ("fi", "Finnish", 2, "(n != 1)", "äöå"),
    ("fr", "French", 2, "(n > 1)", "«»àâçéèêëîïôûùüÿœæ"),
    ("ga", "Irish", 5, "n==1 ? 0 : n==2 ? 1 : n<7 ? 2 : n<11 ? 3 : 4", "áéíóú"),
    ("gl", "Galician", 2, "(n != 1)", ""),
    ("gu", "Gujarati", 2, "(n != 1)", ""),
    ("he", "Hebrew", 2, "(n != 1)", ""),
    ("hi", "Hindi", 2, "(n != 1)", ""),
    ("hr", "Croatian", 3, SLAVIC_3, "čćđšž"),
    ("hu", "Hungarian", 2, "(n != 1)", "őű"),
    ("hy", "Armenian", 1, "0", ""),
    ("id", "Indonesian", 1, "0", ""),
    ("is", "Icelandic", 2, "(n != 1)", "ðþæ"),
    ("it", "Italian", 2, "(n != 1)", ""),
    ("ja", "Japanese", 1, "0", ""),
    ("ka", "Georgian", 1, "0", ""),
    ("kk", "Kazakh", 1, "0", ""),
    ("km", "Central Khmer", 1, "0", ""),
    ("ko", "Korean", 1, "0", ""),
    ("lt", "Lithuanian", 3, "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && (n%100<10 || n%100>=20) ? 1 : 2)", "ąčęėįšųūž"),
    ("lv", "Latvian", 3, "(n%10==1 && n%100!=11 ? 0 : n != 0 ? 1 : 2)", "āčēģīķļņšūž"),
    ("mk", "Macedonian", 2, "(n==1 || n%10==1 ? 0 : 1)", ""),
    ("ms", "Malay", 1, "0", ""),
    ("mt", "Maltese", 4, "(n==1 ? 0 : n==0 || ( n%100>1 && n%100<11) ? 1 : (n%100>10 && n%100<20 ) ? 2 : 3)", "ċġħż"),
    ("nb", "Norwegian Bokmål", 2, "(n != 1)", "æøå"),
    ("nl", "Dutch; Flemish", 2, "(n != 1)", ""),
    ("nn", "Norwegian Nynorsk", 2, "(n != 1)", "æøå"),
    ("pl", "Polish", 3, "(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)", "ąćęłńóśźż"),
    ("pt", "Portuguese", 2, "(n != 1)", ""),
    ("pt_BR", "Portuguese (Brazil)", 2, "(n > 1)", ""),
    ("ro", "Romanian", 3, "(n==1 ? 0 : (n==0 || (n%100 > 0 && n%100 < 20)) ? 1 : 2)", "ăâîșț"),
    ("ru", "Russian", 3, SLAVIC_3, "ё"),
    ("sk", "Slovak", 3, "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2", ""),
    ("sl", "Slovenian", 4, "(n%100==1 ? 0 : n%100==2 ? 1 : n%100==3 || n%100==4 ? 2 : 3)", "čšž"),
    ("sq", "Albanian", 2, "(n != 1)", "ëç"),
    ("sr", "Serbian", 3, SLAVIC_3, ""),
    ("sv", "Swedish", 2, "(n != 1)", "åäö"),
    ("ta", "Tamil", 2, "(n != 1)", ""),
    ("th", "Thai", 1, "0", ""),
    ("tr", "Turkish", 2, "(n != 1)", "çğıİöşü"),
    ("uk", "Ukrainian", 3, SLAVIC_3, "ґєії"),
    ("vi", "Vietnamese", 1, "0", ""),
    ("zh_CN", "Chinese (China)", 1, "0", ""),
    ("zh_TW", "Chinese (Taiwan)", 1, "0", ""),
    ("zu", "Zulu", 2, "(n != 1)", ""),
];

static INDEX: Lazy<BTreeMap<&'static str, LanguageMetadata>> = Lazy::new(|| {
    LANGUAGES
        .iter()
        .map(|&(code, name, nplurals, plural, specialchars)| {
            let metadata = LanguageMetadata {
                fullname: Some(name.to_string()),
                nplurals: Some(nplurals),
                pluralequation: Some(plural.to_string()),
                specialchars: (!specialchars.is_empty()).then(|| specialchars.to_string()),
            };
            (code, metadata)
        })
        .collect()
});

/// Catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        INDEX.len()
    }

    pub fn is_empty(&self) -> bool {
        INDEX.is_empty()
    }
}

impl LanguageCatalog for BuiltinCatalog {
    fn codes(&self) -> Vec<String> {
        INDEX.keys().map(|code| code.to_string()).collect()
    }

    fn lookup(&self, code: &str) -> Result<LanguageMetadata, CatalogError> {
        INDEX
            .get(code)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLanguage(code.to_string()))
    }
}
