//! String translation tables with language fallback.

use ahash::HashMap;
use itertools::Itertools as _;

pub const DEFAULT_LANG: &str = "en";

/// Key naming a language in its own table, e.g. `"language_name": "Português"`.
pub const LANGUAGE_NAME_KEY: &str = "language_name";

#[derive(Debug)]
pub enum I18nError {
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "serde")]
            Self::Json(ref err) => write!(f, "translation json error: {err}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            #[cfg(feature = "serde")]
            Self::Json(ref err) => Some(err),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Browser-style language tag normalization: `pt_BR` → `pt-br`.
pub fn normalize_lang(tag: &str) -> String {
    tag.to_lowercase().replace('_', "-")
}

type Strings = HashMap<String, String>;

/// Translation tables keyed by language code.
///
/// The active table is the requested language's, else the default language's, else empty.
/// Lookups of missing keys return the key itself.
#[derive(Clone, Debug)]
pub struct Translator {
    translations: HashMap<String, Strings>,
    navigator_lang: String,
    default_lang: String,
    lang: String,
}

impl Translator {
    /// `navigator_lang` is the host's preferred language, used when no language is requested.
    pub fn new(navigator_lang: &str) -> Self {
        Self::with_default(navigator_lang, DEFAULT_LANG)
    }

    pub fn with_default(navigator_lang: &str, default_lang: &str) -> Self {
        let navigator_lang = normalize_lang(navigator_lang);
        Self {
            translations: HashMap::default(),
            lang: navigator_lang.clone(),
            navigator_lang,
            default_lang: default_lang.to_owned(),
        }
    }

    pub fn add_language<K, V>(&mut self, lang: &str, strings: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = strings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.translations.insert(lang.to_owned(), table);
    }

    /// Adds a language from a flat JSON object of key → string.
    #[cfg(feature = "serde")]
    pub fn load_json(&mut self, lang: &str, json: &str) -> Result<(), I18nError> {
        let strings: Strings = serde_json::from_str(json)?;
        self.translations.insert(lang.to_owned(), strings);
        Ok(())
    }

    /// Known languages, sorted.
    pub fn langs(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).sorted().collect()
    }

    /// Active language; `None` selects the navigator language.
    pub fn set_lang(&mut self, lang: Option<&str>) {
        self.lang = lang.map_or_else(|| self.navigator_lang.clone(), str::to_owned);
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn active(&self) -> Option<&Strings> {
        self.translations
            .get(&self.lang)
            .or_else(|| self.translations.get(&self.default_lang))
    }

    /// Translates `key` into the active language.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.active()
            .and_then(|strings| strings.get(key))
            .map_or(key, String::as_str)
    }

    /// Translates `key` into `lang`, without fallback to the default language.
    pub fn tl<'a>(&'a self, key: &'a str, lang: &str) -> &'a str {
        self.translations
            .get(lang)
            .and_then(|strings| strings.get(key))
            .map_or(key, String::as_str)
    }

    /// A language's own name for itself, else its code.
    pub fn lang_name<'a>(&'a self, lang: &'a str) -> &'a str {
        match self.tl(LANGUAGE_NAME_KEY, lang) {
            LANGUAGE_NAME_KEY => lang,
            name => name,
        }
    }
}
