//! App Configuration
//!
//! Optional `window.__POTLUCK_CONFIG__` object set by the host page.
//! Missing or malformed configuration falls back to defaults.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use potluck_store::DEFAULT_KEY_PREFIX;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Language shown on first load
    pub default_language: String,
    /// Language used for keys the active one lacks
    pub fallback_language: String,
    /// Key prefix for cached user profiles in localStorage
    pub storage_prefix: String,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            fallback_language: "en".to_string(),
            storage_prefix: DEFAULT_KEY_PREFIX.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

pub fn load_config() -> AppConfig {
    let Some(window) = web_sys::window() else {
        return AppConfig::default();
    };
    let Ok(raw) = js_sys::Reflect::get(&window, &JsValue::from_str("__POTLUCK_CONFIG__")) else {
        return AppConfig::default();
    };
    if raw.is_undefined() || raw.is_null() {
        return AppConfig::default();
    }
    serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("[CONFIG] Ignoring invalid config: {}", e).into());
        AppConfig::default()
    })
}
