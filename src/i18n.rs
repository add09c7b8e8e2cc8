//! Translation lookup with English fallback and a JSON cache file.

use crate::models::TranslationMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

pub const FALLBACK_LANGUAGE: &str = "en";

/// Shared, swappable translation table.
#[derive(Clone, Default)]
pub struct Translator {
    table: Arc<RwLock<TranslationMap>>,
}

impl Translator {
    pub fn new(table: TranslationMap) -> Self {
        Translator {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Replace the whole table.
    pub fn replace(&self, table: TranslationMap) {
        let mut guard = self.table.write().unwrap_or_else(|e| e.into_inner());
        *guard = table;
    }

    /// Merge one language into the table, overwriting existing keys.
    pub fn merge(&self, lang: &str, entries: HashMap<String, String>) {
        let mut guard = self.table.write().unwrap_or_else(|e| e.into_inner());
        guard.entry(lang.to_string()).or_default().extend(entries);
    }

    pub fn snapshot(&self) -> TranslationMap {
        self.table.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.table
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .all(HashMap::is_empty)
    }

    /// `lang` table, then English, then the key itself.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        let guard = self.table.read().unwrap_or_else(|e| e.into_inner());
        guard
            .get(lang)
            .and_then(|t| t.get(key))
            .or_else(|| guard.get(FALLBACK_LANGUAGE).and_then(|t| t.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate, then substitute `{name}` placeholders.
    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        format_placeholders(&self.translate(lang, key), args)
    }

    /// Write the table as pretty JSON.
    pub fn save_cache(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "saved translations to cache file");
        Ok(())
    }

    /// Read a cache file. Missing or unreadable files give an empty table.
    pub fn load_cache(path: &Path) -> TranslationMap {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(table) => {
                    tracing::info!(path = %path.display(), "loaded translations from cache file");
                    table
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "invalid translation cache");
                    TranslationMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "translation cache file does not exist");
                TranslationMap::new()
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read translation cache");
                TranslationMap::new()
            }
        }
    }
}

pub fn format_placeholders(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

/// Primary language subtag of the first `Accept-Language` entry, lowercased.
pub fn parse_accept_language(header: &str) -> Option<String> {
    let first = header.split(',').next()?.split(';').next()?.trim();
    let primary = first.split(['-', '_']).next()?.trim().to_lowercase();
    if primary.is_empty() || primary == "*" || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        let mut table = TranslationMap::new();
        table.insert(
            "en".into(),
            [
                ("hello".to_string(), "Hello {name}".to_string()),
                ("bye".to_string(), "Bye".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        table.insert(
            "cs".into(),
            [("hello".to_string(), "Ahoj {name}".to_string())]
                .into_iter()
                .collect(),
        );
        Translator::new(table)
    }

    #[test]
    fn test_fallback_chain() {
        let t = translator();
        assert_eq!(t.translate("cs", "hello"), "Ahoj {name}");
        assert_eq!(t.translate("cs", "bye"), "Bye");
        assert_eq!(t.translate("de", "bye"), "Bye");
        assert_eq!(t.translate("cs", "missing_key"), "missing_key");
    }

    #[test]
    fn test_placeholders() {
        let t = translator();
        assert_eq!(t.translate_with("cs", "hello", &[("name", "Eva")]), "Ahoj Eva");
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("translations.json");
        translator().save_cache(&path).unwrap();
        let loaded = Translator::load_cache(&path);
        assert_eq!(loaded["cs"]["hello"], "Ahoj {name}");
    }

    #[test]
    fn test_missing_or_bad_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Translator::load_cache(&dir.path().join("nope.json")).is_empty());
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(Translator::load_cache(&bad).is_empty());
    }

    #[test]
    fn test_replace_and_merge() {
        let t = Translator::default();
        assert!(t.is_empty());
        t.merge("en", [("a".to_string(), "A".to_string())].into_iter().collect());
        assert_eq!(t.translate("en", "a"), "A");
        t.replace(TranslationMap::new());
        assert_eq!(t.translate("en", "a"), "a");
    }

    #[test]
    fn test_accept_language() {
        assert_eq!(parse_accept_language("cs-CZ,cs;q=0.9,en;q=0.8").as_deref(), Some("cs"));
        assert_eq!(parse_accept_language("EN").as_deref(), Some("en"));
        assert_eq!(parse_accept_language("*"), None);
        assert_eq!(parse_accept_language(""), None);
    }
}
