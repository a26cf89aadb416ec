//! Translation Catalog
//!
//! Language resources are nested JSON objects addressed by dot-separated
//! keys (`event.items.add`). Lookup order: active language, fallback
//! language, then the key itself.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{LocaleError, LocaleResult};

/// Find `key` in a resource. A literal key at any level wins over
/// descending, so files that still hold flat `a.b` keys resolve too.
pub fn resolve<'a>(resource: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(value) = resource.get(key) {
        return Some(value);
    }
    let (head, rest) = key.split_once('.')?;
    resolve(resource.get(head)?, rest)
}

/// Substitute `{{name}}` placeholders. Unknown placeholders stay as written.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{{{}}}}}", name), value);
    }
    out
}

#[derive(Debug, Clone)]
pub struct Catalog {
    resources: HashMap<String, Value>,
    language: String,
    fallback: String,
}

impl Catalog {
    pub fn new(fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        Self {
            resources: HashMap::new(),
            language: fallback.clone(),
            fallback,
        }
    }

    pub fn with_resource(mut self, language: impl Into<String>, resource: Value) -> Self {
        self.add_resource(language, resource);
        self
    }

    pub fn add_resource(&mut self, language: impl Into<String>, resource: Value) {
        self.resources.insert(language.into(), resource);
    }

    pub fn add_resource_json(&mut self, language: impl Into<String>, json: &str) -> LocaleResult<()> {
        let language = language.into();
        let resource: Value = serde_json::from_str(json).map_err(|source| LocaleError::Json {
            origin: format!("resource '{}'", language),
            source,
        })?;
        if !resource.is_object() {
            return Err(LocaleError::NotAnObject {
                origin: format!("resource '{}'", language),
            });
        }
        self.add_resource(language, resource);
        Ok(())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Loaded languages, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Switch the active language. Unknown languages are rejected and the
    /// current one stays.
    pub fn set_language(&mut self, language: &str) -> bool {
        if !self.resources.contains_key(language) {
            log::warn!("No resources for language '{}', keeping '{}'", language, self.language);
            return false;
        }
        self.language = language.to_string();
        true
    }

    /// String translation of `key` in `language`, without fallback
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        resolve(self.resources.get(language)?, key)?.as_str()
    }

    pub fn translate(&self, key: &str) -> String {
        if let Some(text) = self.lookup(&self.language, key) {
            return text.to_string();
        }
        if let Some(text) = self.lookup(&self.fallback, key) {
            log::debug!("'{}' missing in '{}', using '{}'", key, self.language, self.fallback);
            return text.to_string();
        }
        log::debug!("No translation for '{}'", key);
        key.to_string()
    }

    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.translate(key), args)
    }
}
