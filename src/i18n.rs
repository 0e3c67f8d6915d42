//! Localization lookup used for user-facing field strings

use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Localization collaborator: resolve a key, falling back to `default`
#[cfg_attr(test, mockall::automock)]
pub trait Translator {
    /// Look up `key`, returning `default` when no entry exists
    fn translate(&self, key: &str, default: &str) -> String;
}

/// Translator that always returns the default text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, _key: &str, default: &str) -> String {
        default.to_string()
    }
}

/// Translator backed by a flat key/text catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON object of `"Key": "Text"` pairs
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} translation entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str, default: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Replace `{name}` placeholders in a translated template
///
/// Substituted text is never scanned again; unknown placeholders stay as is.
pub fn inject(template: &str, params: &[(&str, &str)]) -> String {
    thread_local! {
        static PLACEHOLDER: Regex = Regex::new(r"\{(\w+)\}")
            .expect("Failed to compile placeholder regex");
    }

    PLACEHOLDER.with(|re| {
        re.replace_all(template, |caps: &Captures<'_>| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_translator_returns_default() {
        let t = DefaultTranslator;
        assert_eq!(t.translate("CheckboxField.YESANSWER", "Yes"), "Yes");
    }

    #[test]
    fn test_catalog_translator_hit_and_miss() {
        let mut entries = HashMap::new();
        entries.insert("CheckboxField.YESANSWER".to_string(), "Ja".to_string());
        let t = CatalogTranslator::new(entries);

        assert_eq!(t.translate("CheckboxField.YESANSWER", "Yes"), "Ja");
        assert_eq!(t.translate("CheckboxField.NOANSWER", "No"), "No");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_catalog_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.json");
        std::fs::write(&path, r#"{"CheckboxField.NOANSWER": "Nein"}"#).unwrap();

        let t = CatalogTranslator::load(&path).unwrap();
        assert_eq!(t.translate("CheckboxField.NOANSWER", "No"), "Nein");
    }

    #[test]
    fn test_inject_replaces_all_placeholders() {
        let text = inject(
            "The value for {name} must not exceed {maxLength} characters",
            &[("name", "Title"), ("maxLength", "10")],
        );
        assert_eq!(text, "The value for Title must not exceed 10 characters");
    }

    #[test]
    fn test_inject_does_not_expand_substituted_text() {
        let text = inject(
            "The value for {name} must not exceed {maxLength} characters",
            &[("name", "Code {maxLength}"), ("maxLength", "2")],
        );
        assert_eq!(
            text,
            "The value for Code {maxLength} must not exceed 2 characters"
        );
    }

    #[test]
    fn test_inject_leaves_unknown_placeholders() {
        assert_eq!(inject("{value} is bad", &[]), "{value} is bad");
    }
}
