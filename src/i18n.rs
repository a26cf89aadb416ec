//! Translations
//!
//! Bundled locale files behind a reactive catalog.

use leptos::prelude::*;

use potluck_i18n::Catalog;

use crate::config::AppConfig;

const BUNDLED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("he", include_str!("../locales/he.json")),
];

#[derive(Clone, Copy)]
pub struct I18n {
    catalog: RwSignal<Catalog>,
}

impl I18n {
    pub fn new(config: &AppConfig) -> Self {
        let mut catalog = Catalog::new(&config.fallback_language);
        for (language, json) in BUNDLED {
            if let Err(e) = catalog.add_resource_json(*language, json) {
                log::error!("Skipping locale {}: {}", language, e);
            }
        }
        if !catalog.set_language(&config.default_language) {
            log::warn!("Unknown language {}, using {}", config.default_language, config.fallback_language);
        }
        Self {
            catalog: RwSignal::new(catalog),
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.catalog.with(|catalog| catalog.translate(key))
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.catalog.with(|catalog| catalog.translate_with(key, args))
    }

    pub fn language(&self) -> String {
        self.catalog.with(|catalog| catalog.language().to_string())
    }

    /// Switch language. Returns false for a language with no bundled file.
    pub fn set_language(&self, language: &str) -> bool {
        let mut changed = false;
        self.catalog.update(|catalog| changed = catalog.set_language(language));
        changed
    }
}

/// Get the translations from context
pub fn use_i18n() -> I18n {
    expect_context::<I18n>()
}
