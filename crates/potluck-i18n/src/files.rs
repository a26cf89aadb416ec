//! Locale Files
//!
//! Reading, writing and repairing `<lang>.json` resource files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{LocaleError, LocaleResult};
use crate::fix::{extra_keys, fill_missing, missing_keys, nest_flat_keys};

pub fn read_locale(path: &Path) -> LocaleResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LocaleError::Json {
        origin: path.display().to_string(),
        source,
    })?;
    if !value.is_object() {
        return Err(LocaleError::NotAnObject {
            origin: path.display().to_string(),
        });
    }
    Ok(value)
}

/// Pretty JSON with a trailing newline
pub fn write_locale(path: &Path, value: &Value) -> LocaleResult<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| LocaleError::Json {
        origin: path.display().to_string(),
        source,
    })?;
    content.push('\n');
    fs::write(path, content).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Nest flat dotted keys in place. Returns whether the file changed.
pub fn nest_file(path: &Path, dry_run: bool) -> LocaleResult<bool> {
    let original = read_locale(path)?;
    let nested = nest_flat_keys(original.clone());
    let changed = nested != original;
    if changed && !dry_run {
        write_locale(path, &nested)?;
    }
    log::info!(
        "{}: {}",
        path.display(),
        if changed { "nested flat keys" } else { "already nested" }
    );
    Ok(changed)
}

/// Key differences of one locale file against the base language
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyReport {
    pub path: PathBuf,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl KeyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_file(base: &Value, path: &Path) -> LocaleResult<KeyReport> {
    let target = read_locale(path)?;
    Ok(KeyReport {
        path: path.to_path_buf(),
        missing: missing_keys(base, &target),
        extra: extra_keys(base, &target),
    })
}

/// Copy missing keys from the base language into the file. Returns the
/// filled key paths.
pub fn fill_file(base: &Value, path: &Path, dry_run: bool) -> LocaleResult<Vec<String>> {
    let mut target = read_locale(path)?;
    let filled = fill_missing(base, &mut target);
    if !filled.is_empty() && !dry_run {
        write_locale(path, &target)?;
    }
    log::info!("{}: filled {} key(s)", path.display(), filled.len());
    Ok(filled)
}
